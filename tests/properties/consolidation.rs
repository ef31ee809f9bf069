//! Property tests for dependency consolidation.

use std::collections::BTreeSet;

use proptest::prelude::*;

use workerhub::domain::entities::ExampleLocation;
use workerhub::domain::ports::RootManifest;
use workerhub::domain::services::{DependencyConsolidator, ManifestParser};

fn declaration() -> impl Strategy<Value = (usize, String, String)> {
    (
        0usize..4,
        prop::sample::select(vec!["torch", "numpy", "pillow", "diffusers", "scipy"]),
        prop::sample::select(vec!["", "==1.0", ">=1.0", "<2", "==2.1.0"]),
    )
        .prop_map(|(example, name, constraint)| (example, name.to_string(), constraint.to_string()))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Consolidated output is sorted by name, and a package
    /// conflicts exactly when its examples disagree on the constraint.
    #[test]
    fn property_consolidation_is_sorted_and_flags_disagreement(
        declared in proptest::collection::vec(declaration(), 0..=16),
    ) {
        let mut entries = Vec::new();
        for (example, name, constraint) in &declared {
            let location = ExampleLocation::new(
                "02_ml",
                format!("e{example}"),
                format!("/r/02_ml/e{example}"),
            );
            entries.extend(ManifestParser::parse([format!("{name}{constraint}").as_str()], &location));
        }

        let consolidator = DependencyConsolidator::default();
        let manifest = consolidator.consolidate(&entries);

        let names: Vec<&String> = manifest.entries.keys().collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(&names, &sorted);

        for entry in manifest.entries.values() {
            let distinct: BTreeSet<&str> = declared
                .iter()
                .filter(|(_, name, _)| *name == entry.package_name)
                .map(|(_, _, constraint)| constraint.as_str())
                .collect();
            prop_assert_eq!(entry.conflict, distinct.len() > 1);
            prop_assert_eq!(entry.chosen_constraint.is_none(), entry.conflict);
        }

        let merged = consolidator.merge_into_root(&manifest, &RootManifest::default());
        let mut resorted = merged.dependencies.clone();
        resorted.sort();
        prop_assert_eq!(merged.dependencies, resorted);
    }
}
