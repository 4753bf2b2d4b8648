//! # End-to-End Registry Flows
//!
//! Drives the public API the way a client would.
//!
//! ## Test Categories
//!
//! 1. **List Lifecycle** - create, query, full replace
//! 2. **Ownership** - non-owner mutations rejected without side effects
//! 3. **Fee Accounting** - exact split, wrong fees, unfunded payers
//! 4. **Events** - what is and is not published

use addr_registry::prelude::*;
use std::time::Duration;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

// =============================================================================
// TEST HELPERS
// =============================================================================

const OWNER_FEE: Amount = 7;
const TREASURY_FEE: Amount = 3;
const FEE: Amount = OWNER_FEE + TREASURY_FEE;

const OWNER: Address = Address::new([0x0a; 20]);
const STRANGER: Address = Address::new([0x0b; 20]);
const PAYER: Address = Address::new([0x0c; 20]);
const TREASURY: Address = Address::new([0xee; 20]);

const A: Address = Address::new([0xa1; 20]);
const B: Address = Address::new([0xa2; 20]);
const C: Address = Address::new([0xa3; 20]);
const D: Address = Address::new([0xa4; 20]);
const E: Address = Address::new([0xa5; 20]);
const F: Address = Address::new([0xa6; 20]);
const X: Address = Address::new([0xff; 20]);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn make_service() -> InMemoryRegistryService {
    init_tracing();
    create_in_memory_service(&RegistryConfig::new(OWNER_FEE, TREASURY_FEE, TREASURY))
        .expect("valid config")
}

fn funded_service(payer_funds: Amount) -> InMemoryRegistryService {
    let service = make_service();
    service.deposit(PAYER, payer_funds).expect("deposit");
    service
}

// =============================================================================
// LIST LIFECYCLE
// =============================================================================

#[tokio::test]
async fn test_create_query_update_scenario() {
    let service = funded_service(10 * FEE);

    let id = service.create_list(OWNER, vec![A, B, C]).await.unwrap();
    assert_eq!(id, ListId::FIRST);

    assert!(service.query_list(PAYER, id, B, FEE).await.unwrap());
    assert!(!service.query_list(PAYER, id, X, FEE).await.unwrap());

    let version = service.update_list(OWNER, id, vec![D, E, F]).await.unwrap();
    assert_eq!(version, 1);

    assert!(!service.query_list(PAYER, id, B, FEE).await.unwrap());
    assert!(service.query_list(PAYER, id, E, FEE).await.unwrap());

    let err = service
        .update_list(STRANGER, id, vec![A, B, C])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);

    let mut members = service.list_members(OWNER, id).unwrap();
    members.sort();
    assert_eq!(members, vec![D, E, F]);
}

#[tokio::test]
async fn test_ids_are_sequential_across_callers() {
    let service = make_service();

    let mut ids = Vec::new();
    for caller in [OWNER, STRANGER, OWNER, PAYER] {
        ids.push(service.create_list(caller, vec![]).await.unwrap());
    }

    assert!(check_sequential_ids(&ids));
    assert_eq!(service.list_count(), 4);
}

#[tokio::test]
async fn test_empty_list_and_duplicates() {
    let service = funded_service(2 * FEE);

    let empty = service.create_list(OWNER, vec![]).await.unwrap();
    assert!(!service.query_list(PAYER, empty, A, FEE).await.unwrap());

    let dup = service.create_list(OWNER, vec![A, A, A]).await.unwrap();
    assert_eq!(service.list_summary(dup).unwrap().member_count, 1);
    assert!(service.query_list(PAYER, dup, A, FEE).await.unwrap());
}

#[tokio::test]
async fn test_update_to_empty_clears_membership() {
    let service = funded_service(FEE);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    service.update_list(OWNER, id, vec![]).await.unwrap();

    assert!(!service.query_list(PAYER, id, A, FEE).await.unwrap());
}

#[tokio::test]
async fn test_summary_tracks_versions() {
    let service = make_service();
    let id = service.create_list(OWNER, vec![A, B]).await.unwrap();

    for expected in 1..=3 {
        assert_eq!(
            service.update_list(OWNER, id, vec![C]).await.unwrap(),
            expected
        );
    }

    let summary = service.list_summary(id).unwrap();
    assert_eq!(summary.owner, OWNER);
    assert_eq!(summary.version, 3);
    assert_eq!(summary.member_count, 1);
}

// =============================================================================
// OWNERSHIP
// =============================================================================

#[tokio::test]
async fn test_non_owner_update_leaves_list_untouched() {
    let service = funded_service(2 * FEE);
    let id = service.create_list(OWNER, vec![A, B]).await.unwrap();

    let err = service.update_list(STRANGER, id, vec![X]).await.unwrap_err();
    assert!(matches!(err, RegistryError::Unauthorized { list_id, caller }
        if list_id == id && caller == STRANGER));

    assert_eq!(service.list_summary(id).unwrap().version, 0);
    assert!(service.query_list(PAYER, id, A, FEE).await.unwrap());
    assert!(!service.query_list(PAYER, id, X, FEE).await.unwrap());
}

#[tokio::test]
async fn test_update_missing_list_is_not_found() {
    let service = make_service();
    service.create_list(OWNER, vec![A]).await.unwrap();

    for raw in [0, 2, 1_000] {
        let list_id = ListId::new(raw);
        assert_eq!(
            service.update_list(OWNER, list_id, vec![A]).await,
            Err(RegistryError::NotFound { list_id })
        );
    }
    assert_eq!(service.stats().await.rejected_requests, 3);
}

#[tokio::test]
async fn test_owner_can_query_own_list() {
    let service = make_service();
    service.deposit(OWNER, FEE).unwrap();
    let id = service.create_list(OWNER, vec![OWNER]).await.unwrap();

    assert!(service.query_list(OWNER, id, OWNER, FEE).await.unwrap());

    // Owner paid the fee and got its own share back.
    assert_eq!(service.balance_of(&OWNER), OWNER_FEE);
    assert_eq!(service.balance_of(&TREASURY), TREASURY_FEE);
}

// =============================================================================
// FEE ACCOUNTING
// =============================================================================

#[tokio::test]
async fn test_exact_fee_split() {
    let service = funded_service(100);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    service.query_list(PAYER, id, A, FEE).await.unwrap();

    assert_eq!(service.balance_of(&PAYER), 100 - FEE);
    assert_eq!(service.balance_of(&OWNER), OWNER_FEE);
    assert_eq!(service.balance_of(&TREASURY), TREASURY_FEE);
}

#[tokio::test]
async fn test_fee_charged_on_miss() {
    let service = funded_service(FEE);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    assert!(!service.query_list(PAYER, id, X, FEE).await.unwrap());
    assert_eq!(service.balance_of(&PAYER), 0);
    assert_eq!(service.balance_of(&OWNER), OWNER_FEE);
}

#[tokio::test]
async fn test_repeated_query_charges_twice() {
    let service = funded_service(2 * FEE);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    let first = service.query_list(PAYER, id, A, FEE).await.unwrap();
    let second = service.query_list(PAYER, id, A, FEE).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(service.balance_of(&PAYER), 0);
    assert_eq!(service.balance_of(&OWNER), 2 * OWNER_FEE);
    assert_eq!(service.balance_of(&TREASURY), 2 * TREASURY_FEE);
}

#[tokio::test]
async fn test_wrong_fee_moves_nothing() {
    let service = funded_service(100);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    for sent in [0, FEE - 1, FEE + 1, 100] {
        let err = service.query_list(PAYER, id, A, sent).await.unwrap_err();
        assert_eq!(
            err,
            RegistryError::InsufficientFee {
                required: FEE,
                sent
            }
        );
    }

    assert_eq!(service.balance_of(&PAYER), 100);
    assert_eq!(service.balance_of(&OWNER), 0);
    assert_eq!(service.balance_of(&TREASURY), 0);
    assert_eq!(service.stats().await.queries_settled, 0);
}

#[tokio::test]
async fn test_unfunded_payer_rejected() {
    let service = funded_service(FEE - 1);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    let err = service.query_list(PAYER, id, A, FEE).await.unwrap_err();
    assert_eq!(
        err,
        RegistryError::InsufficientBalance {
            address: PAYER,
            required: FEE,
            available: FEE - 1
        }
    );
    assert_eq!(service.balance_of(&PAYER), FEE - 1);
    assert_eq!(service.balance_of(&OWNER), 0);
}

#[tokio::test]
async fn test_zero_fee_registry() {
    init_tracing();
    let service = create_in_memory_service(&RegistryConfig::new(0, 0, TREASURY)).unwrap();
    let id = service.create_list(OWNER, vec![A]).await.unwrap();

    assert!(service.query_list(PAYER, id, A, 0).await.unwrap());
    assert!(service.query_list(PAYER, id, A, 1).await.is_err());
    assert_eq!(service.balance_of(&PAYER), 0);
}

#[tokio::test]
async fn test_stats_totals() {
    let service = funded_service(3 * FEE);
    let id = service.create_list(OWNER, vec![A]).await.unwrap();
    service.update_list(OWNER, id, vec![B]).await.unwrap();

    for _ in 0..3 {
        service.query_list(PAYER, id, B, FEE).await.unwrap();
    }
    let _ = service.query_list(PAYER, id, B, FEE).await;

    let stats = service.stats().await;
    assert_eq!(stats.lists_created, 1);
    assert_eq!(stats.lists_updated, 1);
    assert_eq!(stats.queries_settled, 3);
    assert_eq!(stats.owner_fees_collected, 3 * OWNER_FEE);
    assert_eq!(stats.treasury_fees_collected, 3 * TREASURY_FEE);
    assert_eq!(stats.rejected_requests, 1);
}

// =============================================================================
// EVENTS
// =============================================================================

#[tokio::test]
async fn test_events_for_create_and_update_only() {
    let service = funded_service(FEE);
    let mut sub = service.publisher().subscribe(EventFilter::all());

    let id = service.create_list(OWNER, vec![A]).await.unwrap();
    service.update_list(OWNER, id, vec![B]).await.unwrap();
    let _ = service.update_list(STRANGER, id, vec![C]).await;
    service.query_list(PAYER, id, B, FEE).await.unwrap();

    let first = timeout(Duration::from_millis(100), sub.recv())
        .await
        .expect("timeout")
        .expect("event");
    let second = timeout(Duration::from_millis(100), sub.recv())
        .await
        .expect("timeout")
        .expect("event");

    assert_eq!(
        first,
        RegistryEvent::ListCreated {
            list_id: id,
            owner: OWNER
        }
    );
    assert_eq!(
        second,
        RegistryEvent::ListUpdated {
            list_id: id,
            owner: OWNER
        }
    );
    assert_eq!(sub.try_recv(), Ok(None));
    assert_eq!(service.publisher().events_published(), 2);
}

#[tokio::test]
async fn test_filtered_subscription() {
    let service = make_service();
    let mut updates = service
        .publisher()
        .subscribe(EventFilter::topics(vec![EventTopic::ListUpdated]));

    let first = service.create_list(OWNER, vec![A]).await.unwrap();
    let second = service.create_list(STRANGER, vec![A]).await.unwrap();
    service.update_list(STRANGER, second, vec![B]).await.unwrap();
    service.update_list(OWNER, first, vec![B]).await.unwrap();

    assert_eq!(
        updates.try_recv(),
        Ok(Some(RegistryEvent::ListUpdated {
            list_id: second,
            owner: STRANGER
        }))
    );
    assert_eq!(
        updates.try_recv(),
        Ok(Some(RegistryEvent::ListUpdated {
            list_id: first,
            owner: OWNER
        }))
    );
    assert_eq!(updates.try_recv(), Ok(None));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_overflowing_fees_fail_startup() {
    let result = create_in_memory_service(&RegistryConfig::new(Amount::MAX, 1, TREASURY));
    assert!(matches!(result, Err(ConfigError::FeeOverflow { .. })));
}

#[test]
fn test_config_from_json_document() {
    let config = RegistryConfig::from_json_str(
        r#"{
            "owner_fee": 7,
            "treasury_fee": 3,
            "treasury": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
            "event_channel_capacity": 8
        }"#,
    )
    .unwrap();

    let service = create_in_memory_service(&config).unwrap();
    assert_eq!(service.treasury(), TREASURY);
    assert_eq!(service.required_fee(), FEE);
    assert_eq!(service.publisher().capacity(), 8);
}
