//! Property tests for route composition.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use proptest::prelude::*;
use serde_json::Value;

use workerhub::domain::entities::{
    handler_fn, DiscoveryPattern, ExampleLocation, RouteDescriptor, WorkerCandidate,
};
use workerhub::domain::services::{AppComposer, ExtractedRouter};
use workerhub::domain::value_objects::{HttpMethod, WorkerType};

#[derive(Debug, Clone)]
struct Declared {
    category: String,
    example: String,
    worker: String,
    paths: Vec<String>,
}

fn declared() -> impl Strategy<Value = Declared> {
    (
        prop::sample::select(vec!["01_getting_started", "02_ml_inference"]),
        prop::sample::select(vec!["hello", "other", "sd", "llm"]),
        prop::sample::select(vec!["gpu", "cpu"]),
        proptest::collection::btree_set("/[a-z]{1,6}", 1..=3),
    )
        .prop_map(|(category, example, worker, paths)| Declared {
            category: category.to_string(),
            example: example.to_string(),
            worker: worker.to_string(),
            paths: paths.into_iter().collect(),
        })
}

fn extracted(declared: &Declared) -> ExtractedRouter {
    let directory = PathBuf::from("/r").join(&declared.category).join(&declared.example);
    let example = ExampleLocation::new(declared.category.clone(), declared.example.clone(), directory.clone());
    let file = format!("{}_worker.toml", declared.worker);
    ExtractedRouter {
        candidate: WorkerCandidate {
            example,
            worker_type: WorkerType::parse(&declared.worker).unwrap(),
            module_path: directory.join(&file),
            module_key: format!("{}/{}/{}", declared.category, declared.example, file),
            pattern: DiscoveryPattern::SingleFile,
        },
        routes: declared
            .paths
            .iter()
            .map(|p| RouteDescriptor {
                method: HttpMethod::Get,
                path: p.clone(),
                handler: handler_fn(p.clone(), |_| Ok(Value::Null)),
                tags: BTreeSet::new(),
            })
            .collect(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Composition is deterministic and independent of input order.
    #[test]
    fn property_composition_is_idempotent(
        routers in proptest::collection::vec(declared(), 0..=8),
        flatten in any::<bool>(),
    ) {
        let composer = AppComposer::new(flatten);
        let forward = composer.compose(routers.iter().map(extracted).collect());
        let again = composer.compose(routers.iter().map(extracted).collect());
        let reversed = composer.compose(routers.iter().rev().map(extracted).collect());

        prop_assert_eq!(forward.table.signature(), again.table.signature());
        prop_assert_eq!(forward.table.signature(), reversed.table.signature());
        prop_assert_eq!(forward.issues.len(), reversed.issues.len());
    }

    /// PROPERTY: Every mounted route lives under its own, unique prefix.
    #[test]
    fn property_mounted_prefixes_are_unique(
        routers in proptest::collection::vec(declared(), 0..=8),
        flatten in any::<bool>(),
    ) {
        let outcome = AppComposer::new(flatten).compose(routers.iter().map(extracted).collect());

        let mut seen = HashSet::new();
        for mount in outcome.table.mounts() {
            prop_assert!(seen.insert(mount.prefix.prefix.clone()));
            for route in &mount.routes {
                prop_assert!(route.path.starts_with(&mount.prefix.prefix));
            }
        }
    }
}
