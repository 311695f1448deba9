//! Property tests for dotenv merging.

use proptest::prelude::*;

use provisioner::application::EnvExport;
use provisioner::domain::entities::{DeploymentPlan, DeploymentRecord, Manifest};
use provisioner::domain::value_objects::{Address, ContentHash, TxHash};

fn export() -> EnvExport {
    let mut manifest = Manifest::new();
    for (n, unit) in ["DIDRegistry", "TrustRegistry"].iter().enumerate() {
        let n = n as u64 + 1;
        let mut record = DeploymentRecord::pending(
            *unit,
            "development",
            1337,
            TxHash::parse(&format!("0x{n:064x}")).unwrap(),
            ContentHash::from_bytes(unit.as_bytes()),
        );
        record
            .confirm(Address::parse(&format!("0x{n:040x}")).unwrap(), n)
            .unwrap();
        manifest.record(record).unwrap();
    }
    EnvExport::from_manifest(
        &manifest,
        &DeploymentPlan::credential_modules(),
        "development",
        "http://127.0.0.1:8545",
    )
    .unwrap()
}

fn dotenv_line() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex("[A-Z_]{1,12}=[a-z0-9:/.]{0,12}").unwrap(),
        proptest::string::string_regex("# [a-z ]{0,16}").unwrap(),
        Just(String::new()),
        Just("DIDREGISTRY_ADDRESS=0xstale".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: exporting twice gives the same file as exporting once.
    #[test]
    fn property_render_is_idempotent(
        lines in proptest::collection::vec(dotenv_line(), 0..10)
    ) {
        let existing = lines.join("\n");
        let export = export();

        let once = export.render(&existing);
        let twice = export.render(&once);

        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: every exported key ends up with its exported value.
    #[test]
    fn property_render_sets_every_key(
        lines in proptest::collection::vec(dotenv_line(), 0..10)
    ) {
        let export = export();
        let rendered = export.render(&lines.join("\n"));

        for (key, value) in export.vars() {
            let prefix = format!("{key}=");
            let expected = format!("{key}={value}");
            let first = rendered.lines().find(|l| l.starts_with(&prefix));
            prop_assert_eq!(first, Some(expected.as_str()));
        }
    }
}
