//! Property tests for deployment plan invariants.

use proptest::prelude::*;

use provisioner::domain::entities::{DeploymentPlan, PlanError};

fn unit_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,15}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a plan of unique names keeps exactly the given order.
    #[test]
    fn property_unique_names_keep_order(
        names in proptest::collection::hash_set(unit_name(), 1..8)
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let plan = DeploymentPlan::from_names(names.clone()).unwrap();

        prop_assert_eq!(plan.names().collect::<Vec<_>>(), names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// PROPERTY: any repeated name is rejected, wherever it appears.
    #[test]
    fn property_duplicates_are_rejected(
        names in proptest::collection::vec(unit_name(), 1..8),
        pick in any::<prop::sample::Index>(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut names = names;
        let dup = names[pick.index(names.len())].clone();
        let pos = at.index(names.len() + 1);
        names.insert(pos, dup.clone());

        let err = DeploymentPlan::from_names(names).unwrap_err();
        let is_duplicate = matches!(err, PlanError::DuplicateUnit { .. });
        prop_assert!(is_duplicate, "expected DuplicateUnit, got {:?}", err);
    }
}
