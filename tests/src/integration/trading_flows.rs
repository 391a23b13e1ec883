//! # Trading Flows
//!
//! Request → offer → match → execute → history, through the command
//! surface the ledger substrate calls.

use std::sync::Arc;

use energy_trading::prelude::*;

use super::support::{decode_transaction, FlakyLedger, Harness, INVOCATION_TS};

// =============================================================================
// HAPPY PATH
// =============================================================================

#[test]
fn test_full_trading_cycle() {
    let h = Harness::new(ContractConfig::default());
    h.request("request1", "consumer1", "100");
    h.offer("offer1", "producer1", "100");

    let tx = h.matched("tx-1", "request1", "offer1");
    assert_eq!(tx.id, "tx-1");
    assert_eq!(tx.request_id, "request1");
    assert_eq!(tx.offer_id, "offer1");
    assert_eq!(tx.energy_amount, EnergyAmount::new(100));
    assert_eq!(tx.timestamp, INVOCATION_TS);
    assert_eq!(tx.status, TransactionStatus::Pending);

    assert!(h.ok("exec", "ExecuteTransaction", &["tx-1"]).is_empty());

    let history = h.history("consumer1");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, TransactionStatus::Completed);
    assert_eq!(h.history("producer1"), history);
}

#[test]
fn test_three_party_history() {
    let h = Harness::new(ContractConfig::default());
    h.request("r1", "c1", "100");
    h.offer("o1", "p1", "100");
    h.request("r2", "c2", "40");
    h.offer("o2", "p1", "40");
    h.matched("t1", "r1", "o1");
    h.matched("t2", "r2", "o2");

    assert_eq!(h.history_ids("c1"), ["t1"]);
    assert_eq!(h.history_ids("c2"), ["t2"]);
    assert_eq!(h.history_ids("p1"), ["t1", "t2"]);
    assert!(h.history("stranger").is_empty());
}

#[test]
fn test_history_is_ordered_by_transaction_id() {
    let h = Harness::new(ContractConfig::default());
    h.request("r1", "c1", "1");
    h.offer("o1", "p1", "1");
    h.request("r2", "c1", "2");
    h.offer("o2", "p2", "2");
    h.matched("zz", "r1", "o1");
    h.matched("aa", "r2", "o2");

    assert_eq!(h.history_ids("c1"), ["aa", "zz"]);
}

#[test]
fn test_records_readable_through_queries() {
    let h = Harness::new(ContractConfig::default());
    h.request("r1", "c1", "12");
    h.offer("o1", "p1", "12");

    let request: EnergyRequest =
        serde_json::from_slice(&h.ok("q", "GetEnergyRequest", &["r1"])).unwrap();
    let offer: EnergyOffer = serde_json::from_slice(&h.ok("q", "GetEnergyOffer", &["o1"])).unwrap();
    assert_eq!(request.consumer_id, "c1");
    assert_eq!(offer.energy_amount, EnergyAmount::new(12));

    let tx = h.matched("t1", "r1", "o1");
    assert_eq!(decode_transaction(&h.ok("q", "GetTransaction", &["t1"])), tx);
}

// =============================================================================
// REJECTIONS
// =============================================================================

#[test]
fn test_mismatched_amounts_leave_ledger_unchanged() {
    let h = Harness::new(ContractConfig::default());
    h.request("r1", "c1", "100");
    h.offer("o1", "p1", "50");
    let before = h.ledger.snapshot().unwrap();

    let response = h.call("t1", "MatchRequestWithOffer", &["r1", "o1"]);
    assert_eq!(response.status, STATUS_ERROR);
    assert!(response
        .message
        .starts_with("Energy amounts do not match between request and offer"));
    assert_eq!(h.ledger.snapshot().unwrap(), before);
}

#[test]
fn test_invalid_amounts_rejected() {
    let h = Harness::new(ContractConfig::default());
    for amount in ["abc", "", "1.5", "0", "-3"] {
        let response = h.call("x", "CreateEnergyOffer", &["o1", "p1", amount, "ts"]);
        assert!(!response.is_ok(), "amount {amount:?} accepted");
        assert!(response.message.starts_with("Invalid energy amount"));
    }
    assert!(h.ledger.is_empty().unwrap());
}

#[test]
fn test_argument_errors() {
    let h = Harness::new(ContractConfig::default());
    assert_eq!(h.call("x", "Nope", &[]).message, "Invalid function name");
    assert_eq!(
        h.call("x", "CreateEnergyRequest", &["r1", "c1", "100"]).message,
        "Incorrect number of arguments. Expecting 4"
    );
    assert_eq!(
        h.call("x", "GetTransactionHistory", &[]).message,
        "Incorrect number of arguments. Expecting 1"
    );
}

#[test]
fn test_missing_records_reported_by_kind() {
    let h = Harness::new(ContractConfig::default());
    h.offer("o1", "p1", "5");

    assert_eq!(
        h.call("t1", "MatchRequestWithOffer", &["r404", "o1"]).message,
        "Energy request r404 does not exist"
    );
    assert_eq!(
        h.call("t1", "ExecuteTransaction", &["t404"]).message,
        "Transaction t404 does not exist"
    );
}

// =============================================================================
// SINGLE-USE GUARD
// =============================================================================

#[test]
fn test_guard_stops_offer_filling_two_requests() {
    let h = Harness::new(ContractConfig::guarded());
    h.request("r1", "c1", "100");
    h.request("r2", "c2", "100");
    h.offer("o1", "p1", "100");
    h.matched("t1", "r1", "o1");

    let response = h.call("t2", "MatchRequestWithOffer", &["r2", "o1"]);
    assert_eq!(
        response.message,
        "Energy offer o1 already matched by transaction t1"
    );
    assert!(h.history("c2").is_empty());
}

#[test]
fn test_default_config_allows_rematching() {
    let h = Harness::new(ContractConfig::default());
    h.request("r1", "c1", "100");
    h.offer("o1", "p1", "100");
    h.matched("t1", "r1", "o1");
    h.matched("t2", "r1", "o1");

    assert_eq!(h.history_ids("c1"), ["t1", "t2"]);
}

// =============================================================================
// STORE FAILURES
// =============================================================================

#[test]
fn test_write_failure_surfaces_as_error_response() {
    let ledger = Arc::new(FlakyLedger::default());
    let h = Harness::with_ledger(Arc::clone(&ledger), ContractConfig::default());
    h.request("r1", "c1", "100");
    h.offer("o1", "p1", "100");

    ledger.fail_writes(true);
    let response = h.call("t1", "MatchRequestWithOffer", &["r1", "o1"]);
    assert_eq!(response.status, STATUS_ERROR);
    assert!(response.message.contains("peer endorsement failed"));

    ledger.fail_writes(false);
    assert!(!h.call("q", "GetTransaction", &["t1"]).is_ok());
    assert!(h.history("c1").is_empty());
    assert_eq!(h.handler.stats().failed, 2);
}

#[test]
fn test_read_failure_aborts_history() {
    let ledger = Arc::new(FlakyLedger::default());
    let h = Harness::with_ledger(Arc::clone(&ledger), ContractConfig::default());
    h.request("r1", "c1", "100");
    h.offer("o1", "p1", "100");
    h.matched("t1", "r1", "o1");

    ledger.fail_reads(true);
    let response = h.call("q", "GetTransactionHistory", &["c1"]);
    assert!(!response.is_ok());
    assert!(response.message.contains("ledger backend unavailable"));
}
