//! Property tests for manifest bookkeeping.

use proptest::prelude::*;

use provisioner::domain::entities::{DeploymentRecord, Manifest};
use provisioner::domain::value_objects::{Address, ContentHash, TxHash};

const UNITS: [&str; 4] = [
    "DIDRegistry",
    "TrustRegistry",
    "CredentialAnchor",
    "RevocationRegistry",
];
const NETWORKS: [&str; 2] = ["development", "sepolia"];

fn confirmed(n: u64, network: &str, unit: &str) -> DeploymentRecord {
    let mut record = DeploymentRecord::pending(
        unit,
        network,
        1337,
        TxHash::parse(&format!("0x{n:064x}")).unwrap(),
        ContentHash::from_bytes(unit.as_bytes()),
    );
    record
        .confirm(Address::parse(&format!("0x{n:040x}")).unwrap(), n)
        .unwrap();
    record
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the current record for a (network, unit) pair is always the
    /// last one recorded, and history keeps every record.
    #[test]
    fn property_latest_record_wins(
        ops in proptest::collection::vec((0..NETWORKS.len(), 0..UNITS.len()), 1..32)
    ) {
        let mut manifest = Manifest::new();
        for (i, (net, unit)) in ops.iter().enumerate() {
            manifest
                .record(confirmed(i as u64 + 1, NETWORKS[*net], UNITS[*unit]))
                .unwrap();
        }

        prop_assert_eq!(manifest.history().len(), ops.len());
        for (net, unit) in &ops {
            let last = ops
                .iter()
                .rposition(|op| op == &(*net, *unit))
                .unwrap() as u64
                + 1;
            let current = manifest.get(NETWORKS[*net], UNITS[*unit]).unwrap();
            prop_assert_eq!(current.block_number(), Some(last));
        }
    }
}
