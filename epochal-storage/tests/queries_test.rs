//! Raw query module tests.

use epochal_storage::queries::{
    attribution_ops, epoch_ops, obligation_ops, projection_ops, snapshot_ops, subject_ops,
};
use epochal_storage::Database;

fn setup() -> Database {
    Database::open_in_memory().unwrap()
}

// ── Snapshots ────────────────────────────────────────────────────────────

#[test]
fn snapshot_ids_increase_in_append_order() {
    let db = setup();
    let a = snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"alice\"]", 100, 10).unwrap();
    let b = snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"bob\"]", 200, 20).unwrap();
    assert!(b > a);
}

#[test]
fn duplicate_snapshot_returns_existing_id() {
    let db = setup();
    let first = snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"alice\"]", 100, 10).unwrap();
    let second = snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"alice\"]", 100, 10).unwrap();
    assert_eq!(first, second);
    assert_eq!(snapshot_ops::count_for_subject(db.conn(), "svc-1").unwrap(), 1);
}

#[test]
fn recent_snapshots_orders_descending_with_block_tiebreak() {
    let db = setup();
    snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"a\"]", 100, 10).unwrap();
    snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"b\"]", 300, 12).unwrap();
    // Same timestamp as the previous row, later block.
    snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"c\"]", 300, 15).unwrap();

    let rows = snapshot_ops::recent_snapshots(db.conn(), "svc-1", 10).unwrap();
    let agents: Vec<&str> = rows.iter().map(|r| r.agents.as_str()).collect();
    assert_eq!(agents, vec!["[\"c\"]", "[\"b\"]", "[\"a\"]"]);
}

#[test]
fn recent_snapshots_respects_limit_and_subject() {
    let db = setup();
    for i in 0..5 {
        snapshot_ops::insert_snapshot(db.conn(), "svc-1", "[\"x\"]", 100 + i, i).unwrap();
    }
    snapshot_ops::insert_snapshot(db.conn(), "svc-2", "[\"y\"]", 100, 1).unwrap();

    let rows = snapshot_ops::recent_snapshots(db.conn(), "svc-1", 3).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.subject == "svc-1"));
}

// ── Projections & subjects ───────────────────────────────────────────────

#[test]
fn projection_upsert_overwrites() {
    let db = setup();
    projection_ops::upsert_projection(db.conn(), "svc-1", "[\"alice\"]", 100).unwrap();
    projection_ops::upsert_projection(db.conn(), "svc-1", "[\"bob\"]", 200).unwrap();

    let row = projection_ops::get_projection(db.conn(), "svc-1").unwrap().unwrap();
    assert_eq!(row.agents, "[\"bob\"]");
    assert_eq!(row.updated_at, 200);
}

#[test]
fn subject_registration_is_idempotent() {
    let db = setup();
    assert!(subject_ops::insert_subject(db.conn(), "svc-1", 100, 1).unwrap());
    assert!(!subject_ops::insert_subject(db.conn(), "svc-1", 200, 2).unwrap());
    assert!(subject_ops::subject_exists(db.conn(), "svc-1").unwrap());
    assert!(!subject_ops::subject_exists(db.conn(), "svc-2").unwrap());
}

// ── Epochs ───────────────────────────────────────────────────────────────

#[test]
fn epoch_lifecycle_round_trip() {
    let db = setup();
    epoch_ops::insert_epoch(db.conn(), 1, 0, "0").unwrap();

    let open = epoch_ops::open_epoch(db.conn()).unwrap().unwrap();
    assert_eq!(open.sequence, 1);
    assert_eq!(open.status, "open");
    assert_eq!(open.end_boundary, None);

    let updated = epoch_ops::finalize_epoch(
        db.conn(),
        1,
        1000,
        1000,
        "42",
        "[7]",
        Some(("5000", "12")),
    )
    .unwrap();
    assert_eq!(updated, 1);

    let closed = epoch_ops::get_epoch(db.conn(), 1).unwrap().unwrap();
    assert_eq!(closed.status, "closed");
    assert_eq!(closed.end_boundary, Some(1000));
    assert_eq!(closed.matured_total, "42");
    assert_eq!(closed.carried_total_bonded.as_deref(), Some("5000"));
    assert_eq!(epoch_ops::max_sequence(db.conn()).unwrap(), 1);
}

#[test]
fn finalize_does_not_touch_closed_epochs() {
    let db = setup();
    epoch_ops::insert_epoch(db.conn(), 1, 0, "0").unwrap();
    epoch_ops::finalize_epoch(db.conn(), 1, 1000, 1000, "0", "[]", None).unwrap();

    let updated = epoch_ops::finalize_epoch(db.conn(), 1, 2000, 2000, "9", "[]", None).unwrap();
    assert_eq!(updated, 0);

    let row = epoch_ops::get_epoch(db.conn(), 1).unwrap().unwrap();
    assert_eq!(row.end_boundary, Some(1000));
    assert_eq!(row.matured_total, "0");
}

// ── Obligations ──────────────────────────────────────────────────────────

#[test]
fn maturity_window_is_exclusive_inclusive() {
    let db = setup();
    let at_lower = obligation_ops::insert_obligation(db.conn(), 1, "1", 1000).unwrap();
    let inside = obligation_ops::insert_obligation(db.conn(), 1, "2", 1500).unwrap();
    let at_upper = obligation_ops::insert_obligation(db.conn(), 1, "3", 2000).unwrap();
    let beyond = obligation_ops::insert_obligation(db.conn(), 1, "4", 2001).unwrap();

    let rows = obligation_ops::maturing_in_window(db.conn(), 1000, 2000).unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.obligation_id).collect();
    assert_eq!(ids, vec![inside, at_upper]);
    assert!(!ids.contains(&at_lower));
    assert!(!ids.contains(&beyond));
}

#[test]
fn mark_matured_skips_already_matured_rows() {
    let db = setup();
    let a = obligation_ops::insert_obligation(db.conn(), 1, "1", 500).unwrap();
    let b = obligation_ops::insert_obligation(db.conn(), 1, "2", 600).unwrap();

    assert_eq!(obligation_ops::mark_matured(db.conn(), &[a], 2).unwrap(), 1);
    // Second attempt covering both: only the fresh row updates.
    assert_eq!(obligation_ops::mark_matured(db.conn(), &[a, b], 3).unwrap(), 1);

    let row_a = obligation_ops::get_obligation(db.conn(), a).unwrap().unwrap();
    assert_eq!(row_a.matured_in_epoch, Some(2));
}

// ── Attributions ─────────────────────────────────────────────────────────

#[test]
fn attribution_round_trip() {
    let db = setup();
    attribution_ops::insert_attribution(
        db.conn(),
        "svc-1",
        "[\"alice\"]",
        "1000",
        150,
        12,
        "snapshot",
        Some(3),
    )
    .unwrap();
    attribution_ops::insert_attribution(
        db.conn(),
        "svc-1",
        "[\"bob\"]",
        "2000",
        250,
        20,
        "projection",
        None,
    )
    .unwrap();

    let rows = attribution_ops::attributions_for_subject(db.conn(), "svc-1").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].basis, "snapshot");
    assert_eq!(rows[0].basis_snapshot_id, Some(3));
    assert_eq!(rows[1].basis, "projection");
    assert_eq!(rows[1].basis_snapshot_id, None);
}
