mod common;

use serde_json::Value;
use tempfile::tempdir;

use common::{getting_started, workerhub, write};

#[test]
fn test_routes_prints_mounted_table() {
    let dir = tempdir().unwrap();
    getting_started(dir.path());

    let output = workerhub(dir.path(), &["routes"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout, @r"
    /01_getting_started/hello/gpu  [01_getting_started > hello]
      POST    /01_getting_started/hello/gpu/hello  gpu_hello
    /01_getting_started/other/cpu  [01_getting_started > other]
      GET     /01_getting_started/other/cpu/status  cpu_status

    2 router(s), 2 route(s) from 2 example(s)
    ");
}

#[test]
fn test_routes_json_reports_issues() {
    let dir = tempdir().unwrap();
    getting_started(dir.path());
    write(
        dir.path(),
        "01_getting_started/misnamed/gpu_worker.toml",
        "[router]\n\n[[router.routes]]\nmethod = \"GET\"\npath = \"/x\"\n",
    );

    let output = workerhub(dir.path(), &["routes", "--json"]);
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "routes");
    assert_eq!(value["routes"].as_array().unwrap().len(), 2);
    let issues = value["report"]["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["kind"], "missing_router");
    assert_eq!(issues[0]["expected"], "gpu_router");
}

#[test]
fn test_routes_strict_fails_on_warnings() {
    let dir = tempdir().unwrap();
    getting_started(dir.path());
    write(dir.path(), "01_getting_started/broken/gpu_worker.toml", "[gpu_router\n");

    let relaxed = workerhub(dir.path(), &["routes"]);
    assert!(relaxed.status.success());

    let strict = workerhub(dir.path(), &["routes", "--strict"]);
    assert!(!strict.status.success());
    let stdout = String::from_utf8_lossy(&strict.stdout);
    assert!(stdout.contains("warning:"), "got:\n{stdout}");
}

#[test]
fn test_routes_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let output = workerhub(dir.path(), &["routes", "--root", "does-not-exist"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("directory not found"), "got:\n{stderr}");
}

#[test]
fn test_routes_respects_config_categories() {
    let dir = tempdir().unwrap();
    getting_started(dir.path());
    write(dir.path(), "02_ml_inference/sd/gpu_worker.toml", common::HELLO_WORKER);
    write(
        dir.path(),
        "workerhub.toml",
        "[discovery]\ncategories = [\"02_ml_inference\"]\n",
    );

    let output = workerhub(dir.path(), &["routes", "--json"]);
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let routes = value["routes"].as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["path"], "/02_ml_inference/sd/gpu/hello");
}

#[test]
fn test_verbose_reports_config_source() {
    let dir = tempdir().unwrap();
    getting_started(dir.path());
    write(dir.path(), "workerhub.toml", "[discovery]\nflatten = false\n");

    let output = workerhub(dir.path(), &["-v", "routes"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loaded config from"), "stderr: {stderr}");
    assert!(stderr.contains("workerhub.toml"));

    let quiet = workerhub(dir.path(), &["routes"]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("loaded config from"));
}
