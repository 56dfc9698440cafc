//! Planning Contract: record reconciliation
//!
//! Properties verified:
//! - Idempotence: a record matching the candidates (any input order)
//!   plans nothing
//! - Creation gating: absent record + candidates only plans a change when
//!   creation is enabled
//! - Safety on empty: an existing record is never dropped because
//!   discovery came back empty
//! - Update detection: a differing set plans exactly one upsert carrying
//!   the full sorted candidate set
//! - TTL is ignored by the comparison
//! - A family with no configured interfaces is never touched

mod common;

use common::record;
use std::net::IpAddr;
use zoneup_core::plan::plan_changes;
use zoneup_core::record::{AddressFamily, AddressSet, RecordType};
use zoneup_core::scanner::CandidateSets;
use zoneup_core::UpdateConfig;

fn config_v4() -> UpdateConfig {
    UpdateConfig::new("Z1", "host.example.com.").with_v4_interfaces(["eth0".to_string()])
}

fn candidates_v4(addrs: &[&str]) -> CandidateSets {
    CandidateSets {
        v4: AddressSet::collect(
            AddressFamily::V4,
            addrs.iter().map(|a| a.parse::<IpAddr>().unwrap()),
        ),
        v6: AddressSet::new(AddressFamily::V6),
    }
}

#[test]
fn matching_record_plans_nothing() {
    let config = config_v4();
    let current = vec![record("host.example.com.", RecordType::A, 300, &["1.2.3.4", "5.6.7.8"])];

    // Candidate input order must not matter
    let candidates = candidates_v4(&["5.6.7.8", "1.2.3.4"]);
    assert!(plan_changes(&config, &current, &candidates).is_empty());
}

#[test]
fn provider_order_does_not_matter_either() {
    let config = config_v4();
    let current = vec![record("host.example.com.", RecordType::A, 300, &["5.6.7.8", "1.2.3.4"])];

    let candidates = candidates_v4(&["1.2.3.4", "5.6.7.8"]);
    assert!(plan_changes(&config, &current, &candidates).is_empty());
}

#[test]
fn absent_record_with_creation_enabled_plans_create() {
    let config = config_v4();
    let candidates = candidates_v4(&["203.0.113.5"]);

    let changes = plan_changes(&config, &[], &candidates);
    assert_eq!(changes.len(), 1);
    let change = &changes[0];
    assert_eq!(change.rtype, RecordType::A);
    assert_eq!(change.name, "host.example.com.");
    assert_eq!(change.ttl, 300);
    assert_eq!(change.addrs, vec!["203.0.113.5".parse::<IpAddr>().unwrap()]);
}

#[test]
fn absent_record_with_creation_disabled_plans_nothing() {
    let config = config_v4().with_create_missing(false);
    let candidates = candidates_v4(&["203.0.113.5"]);

    assert!(plan_changes(&config, &[], &candidates).is_empty());
}

#[test]
fn absent_record_with_no_candidates_plans_nothing() {
    let config = config_v4();
    assert!(plan_changes(&config, &[], &candidates_v4(&[])).is_empty());
}

#[test]
fn empty_discovery_never_drops_a_published_record() {
    let config = config_v4();
    let current = vec![record("host.example.com.", RecordType::A, 300, &["8.8.8.8"])];

    assert!(plan_changes(&config, &current, &candidates_v4(&[])).is_empty());
}

#[test]
fn differing_set_plans_one_sorted_upsert() {
    let config = config_v4();
    let current = vec![record("host.example.com.", RecordType::A, 300, &["1.2.3.4"])];
    let candidates = candidates_v4(&["1.2.3.5", "1.2.3.4"]);

    let changes = plan_changes(&config, &current, &candidates);
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0].addrs,
        vec![
            "1.2.3.4".parse::<IpAddr>().unwrap(),
            "1.2.3.5".parse::<IpAddr>().unwrap()
        ]
    );
}

#[test]
fn shrinking_to_a_nonempty_subset_still_updates() {
    let config = config_v4();
    let current = vec![record("host.example.com.", RecordType::A, 300, &["1.2.3.4", "1.2.3.5"])];
    let candidates = candidates_v4(&["1.2.3.4"]);

    let changes = plan_changes(&config, &current, &candidates);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].addrs, vec!["1.2.3.4".parse::<IpAddr>().unwrap()]);
}

#[test]
fn ttl_only_difference_is_a_noop() {
    let mut config = config_v4();
    config.ttl = 60;
    let current = vec![record("host.example.com.", RecordType::A, 3600, &["1.2.3.4"])];

    assert!(plan_changes(&config, &current, &candidates_v4(&["1.2.3.4"])).is_empty());
}

#[test]
fn unrequested_family_is_untouched() {
    // Only IPv4 interfaces configured: the AAAA record must be skipped
    // entirely, even though it differs from the (empty) v6 candidates.
    let config = config_v4();
    let current = vec![
        record("host.example.com.", RecordType::A, 300, &["1.2.3.4"]),
        record("host.example.com.", RecordType::Aaaa, 300, &["2001:db8::1"]),
    ];

    assert!(plan_changes(&config, &current, &candidates_v4(&["1.2.3.4"])).is_empty());
}

#[test]
fn both_families_plan_independently() {
    let config = UpdateConfig::new("Z1", "host.example.com.")
        .with_v4_interfaces(["eth0".to_string()])
        .with_v6_interfaces(["eth0".to_string()]);
    let current = vec![record("host.example.com.", RecordType::A, 300, &["8.8.8.8"])];
    let candidates = CandidateSets {
        v4: AddressSet::collect(AddressFamily::V4, ["9.9.9.9".parse().unwrap()]),
        v6: AddressSet::collect(AddressFamily::V6, ["2600:1f14::2".parse().unwrap()]),
    };

    let changes = plan_changes(&config, &current, &candidates);
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].rtype, RecordType::A);
    assert_eq!(changes[1].rtype, RecordType::Aaaa);
}
