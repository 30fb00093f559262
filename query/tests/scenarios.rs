//! End-to-end query scenarios over a small in-memory chain:
//!
//! ```text
//! head -> P3 (seq 3, 2 txns) -> P2 (seq 2, 1 txn) -> P1 (seq 1, 0 txns) -> sentinel
//! ```

use std::sync::Arc;

use poolscan_crypto::canonicalize_address;
use poolscan_nullables::NullPoolStore;
use poolscan_query::{QueryContext, QueryError, QueryService};
use poolscan_types::{Amount, Currency, Pool, PoolHash, Transaction, TransactionId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn transfer(from: &str, to: &str, amount: i64, balance: i64) -> Transaction {
    Transaction::new(
        TransactionId::new(PoolHash::ZERO, 0),
        canonicalize_address(from),
        canonicalize_address(to),
        Amount::from_integral(amount),
        Currency::new("CS"),
        Amount::from_integral(balance),
    )
}

struct Fixture {
    store: Arc<NullPoolStore>,
    service: QueryService,
    p1: Pool,
    p2: Pool,
    p3: Pool,
}

fn fixture() -> Fixture {
    let store = Arc::new(NullPoolStore::new());
    let p1 = store.append(vec![]);
    let p2 = store.append(vec![transfer("carol", "dave", 7, 93)]);
    let p3 = store.append(vec![
        transfer("erin", "frank", 3, 50),
        transfer("grace", "carol", 2, 10),
    ]);
    let ctx = QueryContext::new(store.clone()).expect("open store");
    Fixture {
        store,
        service: QueryService::new(ctx),
        p1,
        p2,
        p3,
    }
}

fn hashes(pools: &[Pool]) -> Vec<PoolHash> {
    pools.iter().map(|p| *p.hash()).collect()
}

// ---------------------------------------------------------------------------
// Chain pagination
// ---------------------------------------------------------------------------

#[test]
fn pool_list_offset_one_limit_two() {
    let f = fixture();
    let page = f.service.pool_list(1, 2).unwrap();
    assert_eq!(hashes(&page), vec![*f.p2.hash(), *f.p1.hash()]);
}

#[test]
fn pool_list_longer_than_chain() {
    let f = fixture();
    let page = f.service.pool_list(0, 10).unwrap();
    assert_eq!(
        hashes(&page),
        vec![*f.p3.hash(), *f.p2.hash(), *f.p1.hash()]
    );
    assert!(f.service.pool_list(3, 10).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Pool transactions
// ---------------------------------------------------------------------------

#[test]
fn pool_transactions_clamped() {
    let f = fixture();
    let txs = f
        .service
        .pool_transactions(&f.p3.hash().to_string(), 1, 5)
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(&txs[0], f.p3.transaction(1).unwrap());
}

#[test]
fn pool_transactions_offset_past_end() {
    let f = fixture();
    assert!(f
        .service
        .pool_transactions(&f.p2.hash().to_string(), 2, 5)
        .unwrap()
        .is_empty());
}

#[test]
fn pool_transactions_unknown_or_malformed_pool() {
    let f = fixture();
    let unknown = PoolHash::new([0x42; 32]).to_string();
    assert!(f.service.pool_transactions(&unknown, 0, 5).unwrap().is_empty());
    assert!(f.service.pool_transactions("garbage", 0, 5).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[test]
fn transaction_lookup_by_id() {
    let f = fixture();
    let expected = f.p3.transaction(0).unwrap();
    let found = f
        .service
        .transaction(&expected.id().to_string())
        .unwrap()
        .expect("transaction exists");
    assert_eq!(&found, expected);
}

#[test]
fn transaction_lookup_nonexistent() {
    let f = fixture();
    let past_end = TransactionId::new(*f.p2.hash(), 5).to_string();
    let unknown_pool = TransactionId::new(PoolHash::new([9; 32]), 0).to_string();
    for id in [past_end.as_str(), unknown_pool.as_str(), "", "not.an.id"] {
        assert!(f.service.transaction(id).unwrap().is_none(), "found {id:?}");
    }
}

#[test]
fn pool_info_roundtrip_through_hash() {
    let f = fixture();
    for pool in [&f.p1, &f.p2, &f.p3] {
        let reloaded = f
            .service
            .pool_info(&pool.hash().to_string())
            .unwrap()
            .expect("pool exists");
        assert_eq!(reloaded.sequence(), pool.sequence());
        assert_eq!(reloaded.previous_hash(), pool.previous_hash());
        assert_eq!(reloaded.transaction_count(), pool.transaction_count());
    }
    assert!(f.p1.previous_hash().is_zero());
}

#[test]
fn pool_info_not_found() {
    let f = fixture();
    assert!(f.service.pool_info("").unwrap().is_none());
    assert!(f
        .service
        .pool_info(&PoolHash::new([1; 32]).to_string())
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

#[test]
fn balance_stops_at_single_source_pool() {
    let f = fixture();
    let before = f.store.loads();
    let report = f.service.balance("carol", &Currency::new("CS")).unwrap();
    // target totals: P3 (3 + 2) + P2 (7), plus carol's recorded balance 93.
    assert_eq!(report.amount, Amount::from_integral(5 + 7 + 93));
    assert!(report.matched_source);
    assert_eq!(report.pools_visited, 2);
    assert_eq!(f.store.loads() - before, 2, "walk must not reach P1");
}

#[test]
fn balance_for_head_source() {
    let f = fixture();
    let report = f.service.balance("erin", &Currency::new("CS")).unwrap();
    assert_eq!(report.amount, Amount::from_integral(5 + 50));
    assert_eq!(report.pools_visited, 1);
}

/// An address that only ever receives is credited with every transfer on the
/// chain, not just its own. This mirrors the accumulation rule as it stands;
/// whether target totals should be filtered by address is an open question.
#[test]
fn balance_for_receive_only_address_sums_every_pool() {
    let f = fixture();
    let report = f.service.balance("frank", &Currency::new("CS")).unwrap();
    assert_eq!(report.amount, Amount::from_integral(5 + 7));
    assert!(!report.matched_source);
    assert_eq!(report.pools_visited, 3);

    let stranger = f.service.balance("nobody", &Currency::new("XX")).unwrap();
    assert_eq!(stranger.amount, report.amount);
}

// ---------------------------------------------------------------------------
// Address history and contracts
// ---------------------------------------------------------------------------

#[test]
fn address_transactions_newest_first() {
    let f = fixture();
    let txs = f.service.address_transactions("carol", 0, 10).unwrap();
    assert_eq!(
        txs.iter().map(|t| *t.id()).collect::<Vec<_>>(),
        vec![*f.p3.transaction(1).unwrap().id(), *f.p2.transaction(0).unwrap().id()]
    );
    let second = f.service.address_transactions("carol", 1, 10).unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id(), f.p2.transaction(0).unwrap().id());
}

#[test]
fn smart_contract_absent_data_is_not_found() {
    let f = fixture();
    assert!(f.service.smart_contract("carol").unwrap().is_none());
    assert!(f.service.smart_contract("nobody").unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Initialisation and concurrency
// ---------------------------------------------------------------------------

#[test]
fn closed_store_cannot_back_a_service() {
    let err = QueryContext::new(Arc::new(NullPoolStore::closed("permission denied")))
        .expect_err("closed store must be rejected");
    assert!(matches!(err, QueryError::StoreUnavailable(ref m) if m == "permission denied"));
}

#[test]
fn concurrent_queries_agree() {
    let f = fixture();
    let expected = f.service.balance("carol", &Currency::new("CS")).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = f.service.clone();
                scope.spawn(move || {
                    let report = service.balance("carol", &Currency::new("CS")).unwrap();
                    let page = service.pool_list(0, 3).unwrap();
                    (report, page.len())
                })
            })
            .collect();
        for handle in handles {
            let (report, len) = handle.join().unwrap();
            assert_eq!(report, expected);
            assert_eq!(len, 3);
        }
    });
}
