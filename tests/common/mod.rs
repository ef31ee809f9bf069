#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub const HELLO_WORKER: &str = r#"
[gpu_router]

[[gpu_router.routes]]
method = "POST"
path = "/hello"
handler = "gpu_hello"
response = { message = "Hello from GPU" }
"#;

pub const STATUS_WORKER: &str = r#"
[cpu_router]

[[cpu_router.routes]]
method = "GET"
path = "/status"
handler = "cpu_status"
response = { status = "ok" }
"#;

pub fn getting_started(root: &Path) {
    write(root, "01_getting_started/hello/gpu_worker.toml", HELLO_WORKER);
    write(root, "01_getting_started/other/workers/cpu/mod.toml", STATUS_WORKER);
}

/// Run the binary against `root` with an isolated user config directory
pub fn workerhub(root: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_workerhub");
    let config_home = root.join(".config-home");
    Command::new(bin)
        .current_dir(root)
        .env("XDG_CONFIG_HOME", &config_home)
        .env("HOME", &config_home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("WORKERHUB_CATEGORIES")
        .env_remove("WORKERHUB_FLATTEN")
        .args(args)
        .output()
        .unwrap()
}
