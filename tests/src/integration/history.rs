//! # History Robustness
//!
//! A history query must return what it can. Damaged or dangling records
//! are skipped in both lookup modes; only store failures abort the query.

use energy_trading::prelude::*;

use super::support::Harness;

fn scan() -> ContractConfig {
    ContractConfig::default()
}

fn indexed() -> ContractConfig {
    ContractConfig {
        history_mode: HistoryMode::Indexed,
        ..ContractConfig::default()
    }
}

fn both_modes() -> [ContractConfig; 2] {
    [scan(), indexed()]
}

/// c1 bought from p1 twice (t1, t2); c2 bought from p2 once (t3).
fn seeded(config: ContractConfig) -> Harness<InMemoryLedger> {
    let h = Harness::new(config);
    h.request("r1", "c1", "10");
    h.offer("o1", "p1", "10");
    h.request("r2", "c1", "20");
    h.offer("o2", "p1", "20");
    h.request("r3", "c2", "30");
    h.offer("o3", "p2", "30");
    h.matched("t1", "r1", "o1");
    h.matched("t2", "r2", "o2");
    h.matched("t3", "r3", "o3");
    h
}

#[test]
fn test_modes_agree_on_clean_ledger() {
    let indexed = seeded(indexed());
    let scanned = seeded(scan());
    for participant in ["c1", "c2", "p1", "p2", "nobody"] {
        assert_eq!(
            indexed.history(participant),
            scanned.history(participant),
            "{participant}"
        );
    }
}

#[test]
fn test_undecodable_transaction_is_skipped() {
    for config in both_modes() {
        let h = seeded(config);
        h.corrupt(&LedgerKey::record(RecordKind::Transaction, "t1"), b"\x00\x01");
        assert_eq!(h.history_ids("c1"), ["t2"]);
        assert_eq!(h.history_ids("p1"), ["t2"]);
    }
}

#[test]
fn test_undecodable_request_is_skipped() {
    for config in both_modes() {
        let h = seeded(config);
        h.corrupt(&LedgerKey::record(RecordKind::Request, "r2"), b"not json");
        assert_eq!(h.history_ids("c1"), ["t1"]);
    }
}

#[test]
fn test_transaction_pointing_at_missing_offer_is_skipped() {
    let h = Harness::new(scan());
    h.request("r1", "c1", "10");
    h.corrupt(
        &LedgerKey::record(RecordKind::Transaction, "orphan"),
        br#"{"id":"orphan","requestId":"r1","offerId":"o-gone","energyAmount":10,"timestamp":"ts","status":"pending"}"#,
    );
    assert!(h.history("c1").is_empty());
}

#[test]
fn test_index_entry_without_transaction_is_skipped() {
    let h = seeded(indexed());
    h.corrupt(&LedgerKey::participant_index("c2", "t0"), b"t0");
    assert_eq!(h.history_ids("c2"), ["t3"]);
}

#[test]
fn test_participant_prefix_does_not_leak() {
    for config in both_modes() {
        let h = Harness::new(config);
        h.request("r1", "c1", "1");
        h.offer("o1", "p", "1");
        h.request("r2", "c10", "2");
        h.offer("o2", "p", "2");
        h.matched("t1", "r1", "o1");
        h.matched("t2", "r2", "o2");
        assert_eq!(h.history_ids("c1"), ["t1"]);
    }
}

#[test]
fn test_max_history_results() {
    let h = seeded(ContractConfig {
        max_history_results: Some(1),
        ..ContractConfig::default()
    });
    assert_eq!(h.history_ids("p1"), ["t1"]);
}

#[test]
fn test_legacy_status_free_records_read_as_pending() {
    let h = Harness::new(scan());
    h.request("r1", "c1", "10");
    h.offer("o1", "p1", "10");
    h.corrupt(
        &LedgerKey::record(RecordKind::Transaction, "old"),
        br#"{"id":"old","requestId":"r1","offerId":"o1","energyAmount":10,"timestamp":"ts"}"#,
    );

    let history = h.history("c1");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, TransactionStatus::Pending);
}

// =============================================================================
// RECORDS CHANGED AFTER MATCHING
// =============================================================================

/// r1 (c1) matched with o1 (p1) as t1, then r1 re-registered under c2.
fn overwritten_after_match(config: ContractConfig) -> Harness<InMemoryLedger> {
    let h = Harness::new(config);
    h.request("r1", "c1", "10");
    h.offer("o1", "p1", "10");
    h.matched("t1", "r1", "o1");
    h.request("r1", "c2", "10");
    h
}

#[test]
fn test_scan_follows_current_request_owner() {
    let h = overwritten_after_match(scan());
    assert!(h.history("c1").is_empty());
    assert_eq!(h.history_ids("c2"), ["t1"]);
    assert_eq!(h.history_ids("p1"), ["t1"]);
}

#[test]
fn test_index_is_fixed_at_match_time() {
    let h = overwritten_after_match(indexed());
    // The join still checks the current owner, so c1 no longer sees t1,
    // but c2 was never indexed.
    assert!(h.history("c1").is_empty());
    assert!(h.history("c2").is_empty());
    assert_eq!(h.history_ids("p1"), ["t1"]);
}

#[test]
fn test_default_mode_serves_ledger_written_without_index() {
    let writer = seeded(scan());
    assert!(writer
        .ledger
        .range_scan("IDX~", "IDX\u{7f}")
        .unwrap()
        .is_empty());

    let reader = Harness::with_ledger(writer.ledger.clone(), ContractConfig::default());
    assert_eq!(reader.history_ids("c1"), ["t1", "t2"]);

    let index_reader = Harness::with_ledger(writer.ledger.clone(), indexed());
    assert!(index_reader.history("c1").is_empty());
}
