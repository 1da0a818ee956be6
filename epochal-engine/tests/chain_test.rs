//! Epoch chain tests: genesis, close/provision, maturation windows,
//! exactly-once counting, corrections, carried-state failure.

use epochal_core::config::{BootstrapConfig, EpochCorrection, GenesisSeed};
use epochal_core::models::{CarriedState, EpochStatus, EventMeta};
use epochal_core::EpochalError;
use epochal_engine::chain;
use epochal_storage::Database;

fn setup() -> (Database, BootstrapConfig) {
    let db = Database::open_in_memory().unwrap();
    let bootstrap = BootstrapConfig::default();
    chain::ensure_genesis(&db, &bootstrap).unwrap();
    (db, bootstrap)
}

fn meta(block_number: u64, block_timestamp: u64) -> EventMeta {
    EventMeta {
        block_number,
        block_timestamp,
        log_index: 0,
        tx_hash: format!("0x{block_number:064x}"),
    }
}

fn carried(total_bonded: u128, reward_rate: u128) -> Option<CarriedState> {
    Some(CarriedState {
        total_bonded,
        reward_rate,
    })
}

// ── Genesis ──────────────────────────────────────────────────────────────

#[test]
fn genesis_seeds_epoch_one_open() {
    let (db, _) = setup();
    let open = chain::open_epoch(&db).unwrap().unwrap();
    assert_eq!(open.sequence, 1);
    assert_eq!(open.start_boundary, 0);
    assert_eq!(open.status, EpochStatus::Open);
    assert_eq!(open.matured_total, 0);
}

#[test]
fn ensure_genesis_is_idempotent() {
    let (db, bootstrap) = setup();
    chain::ensure_genesis(&db, &bootstrap).unwrap();
    let open = chain::open_epoch(&db).unwrap().unwrap();
    assert_eq!(open.sequence, 1);
}

// ── Close & provision ────────────────────────────────────────────────────

#[test]
fn closing_provisions_the_successor_atomically() {
    let (db, bootstrap) = setup();
    let result = chain::close_epoch(&db, &meta(10, 1000), carried(5000, 12), &bootstrap).unwrap();

    assert_eq!(result.closed.sequence, 1);
    assert_eq!(result.closed.end_boundary, Some(1000));
    assert_eq!(result.closed.status, EpochStatus::Closed);
    assert_eq!(
        result.closed.carried_state,
        Some(CarriedState {
            total_bonded: 5000,
            reward_rate: 12
        })
    );

    assert_eq!(result.provisioned.sequence, 2);
    assert_eq!(result.provisioned.start_boundary, 1001);
    assert_eq!(result.provisioned.status, EpochStatus::Open);
    assert_eq!(result.provisioned.matured_total, 0);
    assert!(result.provisioned.matured_obligations.is_empty());
}

#[test]
fn sequences_are_gapless_and_boundaries_chain() {
    let (db, bootstrap) = setup();
    for (i, end) in [1000u64, 2500, 2600, 9000].iter().enumerate() {
        let result =
            chain::close_epoch(&db, &meta(i as u64 + 1, *end), carried(1, 1), &bootstrap).unwrap();
        assert_eq!(result.closed.sequence, i as u64 + 1);
        assert_eq!(result.provisioned.sequence, i as u64 + 2);
        assert_eq!(
            result.closed.end_boundary.unwrap() + 1,
            result.provisioned.start_boundary
        );
    }
}

#[test]
fn boundary_before_start_is_fatal() {
    let (db, bootstrap) = setup();
    chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();

    // Epoch 2 starts at 1001; an earlier boundary cannot close it.
    let err = chain::close_epoch(&db, &meta(2, 500), carried(1, 1), &bootstrap).unwrap_err();
    assert!(matches!(err, EpochalError::Chain(_)));

    // The open epoch is untouched.
    let open = chain::open_epoch(&db).unwrap().unwrap();
    assert_eq!(open.sequence, 2);
    assert_eq!(open.end_boundary, None);
}

// ── Scenario B: maturation windows ───────────────────────────────────────

#[test]
fn obligation_matures_in_the_epoch_containing_its_maturity() {
    let (db, bootstrap) = setup();

    // Created in epoch 1, maturing at 1500 — after epoch 1's end.
    let id = chain::record_obligation(&db, 700, 1500).unwrap();

    let first = chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();
    assert!(first.closed.matured_obligations.is_empty());
    assert_eq!(first.closed.matured_total, 0);

    let second = chain::close_epoch(&db, &meta(2, 2000), carried(1, 1), &bootstrap).unwrap();
    assert_eq!(second.closed.matured_obligations, vec![id]);
    assert_eq!(second.closed.matured_total, 700);

    let obligation = chain::get_obligation(&db, id).unwrap().unwrap();
    assert_eq!(obligation.created_in_epoch, 1);
    assert_eq!(obligation.matured_in_epoch, Some(2));
}

#[test]
fn obligation_maturing_on_the_boundary_counts_in_the_closing_epoch() {
    let (db, bootstrap) = setup();
    let id = chain::record_obligation(&db, 100, 1000).unwrap();

    let first = chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();
    assert_eq!(first.closed.matured_obligations, vec![id]);
}

#[test]
fn each_obligation_matures_exactly_once_across_the_chain() {
    let (db, bootstrap) = setup();

    let a = chain::record_obligation(&db, 10, 500).unwrap(); // epoch 1
    let b = chain::record_obligation(&db, 20, 1500).unwrap(); // epoch 2
    let c = chain::record_obligation(&db, 30, 5000).unwrap(); // epoch 3

    chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();
    chain::close_epoch(&db, &meta(2, 2000), carried(1, 1), &bootstrap).unwrap();
    chain::close_epoch(&db, &meta(3, 6000), carried(1, 1), &bootstrap).unwrap();

    let mut seen = Vec::new();
    for sequence in 1..=3 {
        let epoch = chain::get_epoch(&db, sequence).unwrap().unwrap();
        seen.extend(epoch.matured_obligations);
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![a, b, c]);
}

#[test]
fn obligation_below_the_open_window_is_rejected() {
    let (db, bootstrap) = setup();

    // Genesis starts at 0, so a maturity of 0 sits below every window a
    // close will ever select from.
    let err = chain::record_obligation(&db, 5, 0).unwrap_err();
    assert!(matches!(err, EpochalError::Chain(_)));

    chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();

    // Epoch 2's window opens just past 1000: a maturity on the closed
    // boundary can no longer be counted anywhere.
    assert!(chain::record_obligation(&db, 5, 1000).is_err());
    let id = chain::record_obligation(&db, 5, 1001).unwrap();

    let second = chain::close_epoch(&db, &meta(2, 2000), carried(1, 1), &bootstrap).unwrap();
    assert_eq!(second.closed.matured_obligations, vec![id]);
}

#[test]
fn indexed_selection_matches_reference_rescan() {
    let (db, bootstrap) = setup();
    for (amount, matures_at) in [(1u128, 300u64), (2, 1000), (3, 1001), (4, 1700), (5, 2400)] {
        chain::record_obligation(&db, amount, matures_at).unwrap();
    }

    let reference = chain::matured_in_window_rescan(&db, 1000, 2000).unwrap();

    chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();
    let second = chain::close_epoch(&db, &meta(2, 2000), carried(1, 1), &bootstrap).unwrap();

    assert_eq!(second.closed.matured_obligations, reference);
}

// ── Corrections ──────────────────────────────────────────────────────────

#[test]
fn registered_correction_adjusts_the_matured_total() {
    let db = Database::open_in_memory().unwrap();
    let bootstrap = BootstrapConfig {
        genesis: GenesisSeed::default(),
        corrections: vec![EpochCorrection {
            sequence: 1,
            matured_total_delta: -25,
            reason: "compensates a recorded overcount in upstream data".to_string(),
        }],
    };
    chain::ensure_genesis(&db, &bootstrap).unwrap();
    chain::record_obligation(&db, 100, 500).unwrap();

    let result = chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();
    assert_eq!(result.closed.matured_total, 75);

    // No correction registered for epoch 2.
    chain::record_obligation(&db, 100, 1500).unwrap();
    let second = chain::close_epoch(&db, &meta(2, 2000), carried(1, 1), &bootstrap).unwrap();
    assert_eq!(second.closed.matured_total, 100);
}

#[test]
fn genesis_seed_total_feeds_epoch_one_aggregate() {
    let db = Database::open_in_memory().unwrap();
    let bootstrap = BootstrapConfig {
        genesis: GenesisSeed {
            start_boundary: 100,
            matured_total: 40,
        },
        corrections: vec![],
    };
    chain::ensure_genesis(&db, &bootstrap).unwrap();
    chain::record_obligation(&db, 60, 500).unwrap();

    let result = chain::close_epoch(&db, &meta(1, 1000), carried(1, 1), &bootstrap).unwrap();
    assert_eq!(result.closed.start_boundary, 100);
    assert_eq!(result.closed.matured_total, 100);
}

// ── Scenario D: carried-state failure ────────────────────────────────────

#[test]
fn close_with_unavailable_carried_state_still_provisions() {
    let (db, bootstrap) = setup();
    let result = chain::close_epoch(&db, &meta(1, 1000), None, &bootstrap).unwrap();

    assert_eq!(result.closed.status, EpochStatus::Closed);
    assert_eq!(result.closed.carried_state, None);
    assert_eq!(result.provisioned.sequence, 2);
    assert_eq!(result.provisioned.status, EpochStatus::Open);

    // The chain keeps going afterwards.
    let second = chain::close_epoch(&db, &meta(2, 2000), carried(9, 9), &bootstrap).unwrap();
    assert_eq!(second.closed.sequence, 2);
    assert!(second.closed.carried_state.is_some());
}
