//! Property tests for requirement parsing.

use proptest::prelude::*;

use workerhub::domain::services::{normalize_name, Requirement};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_requirement_never_panics(raw in ".{0,64}") {
        let _ = Requirement::parse(&raw);
    }

    /// PROPERTY: A parsed name is already normalised.
    #[test]
    fn property_parsed_name_is_normalized(
        name in "[A-Za-z0-9]([A-Za-z0-9._-]{0,10}[A-Za-z0-9])?",
        constraint in "(==|>=|<=|~=|!=)[0-9]{1,2}(\\.[0-9]{1,2}){0,2}",
    ) {
        let req = Requirement::parse(&format!("{name} {constraint}")).unwrap();
        prop_assert_eq!(normalize_name(&req.name), req.name.clone());
        prop_assert_eq!(req.constraint, constraint);
    }

    /// PROPERTY: Normalisation is idempotent.
    #[test]
    fn property_normalize_is_idempotent(name in "[A-Za-z0-9._-]{0,24}") {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once.clone());
    }
}
