mod common;

use common::MockTransport;
use ethwire::subscription::{SubscriptionEvent, SyncingConfig};
use ethwire::{DecodeError, EthWireError};
use ethwire_client::{EthClient, EthClientConfig, Subscription, TransportSubscriptionId};
use futures::StreamExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const LOWERCASE: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

fn syncing_notification(current: u64, highest: u64) -> Value {
    json!({
        "syncing": true,
        "status": {
            "startingBlock": "0x0",
            "currentBlock": format!("0x{current:x}"),
            "highestBlock": format!("0x{highest:x}"),
        },
    })
}

fn progress(current: u64, highest: u64) -> Value {
    json!({"startingBlock": 0, "currentBlock": current, "highestBlock": highest})
}

fn drain(subscription: &mut Subscription) -> Vec<SubscriptionEvent> {
    std::iter::from_fn(|| subscription.try_next_event()).collect()
}

// --- Syncing ---

#[tokio::test(start_paused = true)]
async fn test_syncing_reports_start_progress_and_one_stop() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let mut syncing = client.subscribe("syncing", vec![]).await.expect("subscribe");

    transport.notify(0, syncing_notification(10, 1000));
    transport.notify(0, syncing_notification(900, 1000));
    tokio::time::sleep(Duration::from_millis(600)).await;
    transport.notify(0, json!(false));
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(
        drain(&mut syncing),
        vec![
            SubscriptionEvent::Changed(json!(true)),
            SubscriptionEvent::Data(progress(10, 1000)),
            SubscriptionEvent::Data(progress(900, 1000)),
            SubscriptionEvent::Changed(json!(false)),
        ]
    );
    assert_eq!(transport.subscribes(), vec![("syncing".to_string(), vec![])]);
}

#[tokio::test(start_paused = true)]
async fn test_syncing_stop_waits_for_a_quiet_period() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let mut syncing = client.subscribe("syncing", vec![]).await.expect("subscribe");

    transport.notify(0, syncing_notification(999, 1000));
    tokio::time::sleep(Duration::from_millis(300)).await;
    transport.notify(0, syncing_notification(1000, 1001));
    tokio::time::sleep(Duration::from_millis(300)).await;

    // The second notification restarted the debounce.
    assert_eq!(drain(&mut syncing).len(), 3);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        drain(&mut syncing),
        vec![SubscriptionEvent::Changed(json!(false))]
    );
}

#[tokio::test(start_paused = true)]
async fn test_syncing_far_from_tip_keeps_syncing() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let mut syncing = client.subscribe("syncing", vec![]).await.expect("subscribe");

    transport.notify(0, syncing_notification(10, 1000));
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(
        drain(&mut syncing),
        vec![
            SubscriptionEvent::Changed(json!(true)),
            SubscriptionEvent::Data(progress(10, 1000)),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_syncing_debounce_is_configurable() {
    let transport = MockTransport::new();
    let config = EthClientConfig {
        syncing: SyncingConfig {
            debounce_ms: 2_000,
            tip_threshold: 5,
        },
    };
    let client = EthClient::with_config(transport.clone(), config);
    let mut syncing = client.subscribe("syncing", vec![]).await.expect("subscribe");

    transport.notify(0, syncing_notification(990, 1000));
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    // 990 is not within 5 blocks of the tip.
    assert_eq!(drain(&mut syncing).len(), 2);

    transport.notify(0, syncing_notification(998, 1000));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(drain(&mut syncing).len(), 1);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(
        drain(&mut syncing),
        vec![SubscriptionEvent::Changed(json!(false))]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_cancels_a_pending_stop() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let mut syncing = client.subscribe("syncing", vec![]).await.expect("subscribe");

    transport.notify(0, syncing_notification(999, 1000));
    client.unsubscribe(&syncing).await.expect("unsubscribe");
    tokio::time::sleep(Duration::from_secs(1)).await;
    transport.notify(0, syncing_notification(999, 1000));

    assert!(syncing.is_closed());
    assert_eq!(
        drain(&mut syncing),
        vec![
            SubscriptionEvent::Changed(json!(true)),
            SubscriptionEvent::Data(progress(999, 1000)),
        ]
    );
    assert_eq!(
        transport.unsubscribes(),
        vec![TransportSubscriptionId("0x1".to_string())]
    );
    assert_eq!(syncing.next().await, None);
}

// --- Logs ---

fn raw_log(index: u64, removed: bool) -> Value {
    json!({
        "address": LOWERCASE,
        "blockHash": "0x7c5a35e9cb3e8ae0e221ab470abae9d446c3a5626ce6689fc777dcffcab52c70",
        "transactionHash": "0x4a3f9b6d4a3ab0d8e46e7c3fc2f3a5b0d1c7b68d3f2d2f1d3c5e1a6b7c8d9e0f",
        "blockNumber": "0x5",
        "logIndex": format!("0x{index:x}"),
        "removed": removed,
    })
}

fn log_index(event: &SubscriptionEvent) -> Option<u64> {
    match event {
        SubscriptionEvent::Data(log) | SubscriptionEvent::Changed(log) => log["logIndex"].as_u64(),
        SubscriptionEvent::Error(_) => None,
    }
}

#[tokio::test]
async fn test_removed_logs_arrive_as_changes() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let mut logs = client
        .subscribe("logs", vec![json!({"address": CHECKSUMMED})])
        .await
        .expect("subscribe");

    transport.notify(0, raw_log(0, false));
    transport.notify(0, raw_log(0, true));

    let live = logs.next().await.expect("live log");
    let removed = logs.next().await.expect("removed log");

    assert!(matches!(&live, SubscriptionEvent::Data(log) if log["address"] == json!(CHECKSUMMED)));
    assert!(matches!(&removed, SubscriptionEvent::Changed(log) if log["removed"] == json!(true)));
    assert!(transport.calls().is_empty());
    assert_eq!(
        transport.subscribes(),
        vec![("logs".to_string(), vec![json!({"address": LOWERCASE})])]
    );
}

#[tokio::test]
async fn test_logs_from_block_replays_history_first() {
    let transport = MockTransport::new();
    transport.respond("eth_getLogs", Ok(json!([raw_log(0, false), raw_log(1, false)])));
    let client = EthClient::new(transport.clone());

    let mut logs = client
        .subscribe("logs", vec![json!({"fromBlock": 1, "address": LOWERCASE})])
        .await
        .expect("subscribe");
    transport.notify(0, raw_log(2, false));

    let indexes: Vec<_> = drain(&mut logs).iter().map(log_index).collect();
    assert_eq!(indexes, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(
        transport.calls(),
        vec![(
            "eth_getLogs".to_string(),
            vec![json!({"fromBlock": "0x1", "address": LOWERCASE})]
        )]
    );
    assert_eq!(
        transport.subscribes(),
        vec![("logs".to_string(), vec![json!({"address": LOWERCASE})])]
    );
}

// --- Data ---

#[tokio::test]
async fn test_undecodable_notification_does_not_end_the_subscription() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let mut heads = client
        .subscribe("newBlockHeaders", vec![])
        .await
        .expect("subscribe");

    transport.notify(0, json!({"number": "0xzz"}));
    transport.notify(0, json!({"number": "0x10"}));

    let events = drain(&mut heads);
    assert!(matches!(
        &events[0],
        SubscriptionEvent::Error(EthWireError::Decode(DecodeError::InvalidQuantity { field, .. }))
            if field == "number"
    ));
    assert_eq!(events[1], SubscriptionEvent::Data(json!({"number": 16})));
    assert!(!heads.is_closed());
    assert_eq!(transport.subscribes()[0].0, "newHeads");
}

#[tokio::test]
async fn test_callback_sees_events_in_stream_order() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut pending = client
        .subscribe_with_callback("pendingTransactions", vec![], {
            let seen = Arc::clone(&seen);
            move |event| seen.lock().unwrap().push(event.clone())
        })
        .await
        .expect("subscribe");

    transport.notify(0, json!("0xaa"));
    transport.notify(0, json!("0xbb"));

    let streamed = drain(&mut pending);
    assert_eq!(
        streamed,
        vec![
            SubscriptionEvent::Data(json!("0xaa")),
            SubscriptionEvent::Data(json!("0xbb")),
        ]
    );
    assert_eq!(*seen.lock().unwrap(), streamed);
    assert_eq!(transport.subscribes()[0].0, "newPendingTransactions");
}

#[tokio::test]
async fn test_dropped_subscription_ignores_late_notifications() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let seen = Arc::new(Mutex::new(0usize));

    let heads = client
        .subscribe_with_callback("newBlockHeaders", vec![], {
            let seen = Arc::clone(&seen);
            move |_| *seen.lock().unwrap() += 1
        })
        .await
        .expect("subscribe");
    drop(heads);

    transport.notify(0, json!({"number": "0x1"}));

    assert_eq!(*seen.lock().unwrap(), 0);
    // Dropping is local; the node-side subscription is only released by unsubscribe.
    assert!(transport.unsubscribes().is_empty());
}

#[tokio::test]
async fn test_unknown_subscription_is_rejected() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());

    let err = client.subscribe("blocks", vec![]).await.expect_err("unknown");

    assert_eq!(err, EthWireError::Resolution("blocks".to_string()));
    assert!(transport.subscribes().is_empty());
}

#[test]
fn test_subscribing_outside_a_runtime_fails() {
    let client = EthClient::new(MockTransport::new());

    let err = futures::executor::block_on(client.subscribe("syncing", vec![]))
        .expect_err("no tokio runtime");

    assert!(matches!(err, EthWireError::Runtime(_)));
}

#[tokio::test]
async fn test_logs_from_symbolic_tag_skips_history() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());

    client
        .subscribe("logs", vec![json!({"fromBlock": "latest", "address": LOWERCASE})])
        .await
        .expect("subscribe");

    assert!(transport.calls().is_empty());
    assert_eq!(
        transport.subscribes(),
        vec![("logs".to_string(), vec![json!({"address": LOWERCASE})])]
    );
}

#[tokio::test]
async fn test_logs_from_earliest_replays_history() {
    let transport = MockTransport::new();
    transport.respond("eth_getLogs", Ok(json!([raw_log(0, false)])));
    let client = EthClient::new(transport.clone());

    let mut logs = client
        .subscribe("logs", vec![json!({"fromBlock": "earliest"})])
        .await
        .expect("subscribe");

    assert_eq!(drain(&mut logs).len(), 1);
    assert_eq!(
        transport.calls(),
        vec![("eth_getLogs".to_string(), vec![json!({"fromBlock": "earliest"})])]
    );
    assert_eq!(transport.subscribes()[0].1, vec![json!({})]);
}

// --- Callbacks touching their own subscription ---

type Slot = Arc<Mutex<Option<Subscription>>>;

/// Delivers a notification on another thread and reports whether it returned in time.
fn notify_within(transport: &Arc<MockTransport>, notification: Value, timeout: Duration) -> bool {
    let (done_tx, done_rx) = std::sync::mpsc::channel();
    let transport = Arc::clone(transport);
    std::thread::spawn(move || {
        transport.notify(0, notification);
        let _ = done_tx.send(());
    });
    done_rx.recv_timeout(timeout).is_ok()
}

#[tokio::test]
async fn test_callback_can_drop_its_own_subscription() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let slot: Slot = Arc::new(Mutex::new(None));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let heads = client
        .subscribe_with_callback("newBlockHeaders", vec![], {
            let slot = Arc::clone(&slot);
            let seen = Arc::clone(&seen);
            move |event| {
                let subscription = slot.lock().unwrap().take();
                let was_closed = subscription.as_ref().map(Subscription::is_closed);
                seen.lock().unwrap().push((event.clone(), was_closed));
                // Stop after the first event.
                drop(subscription);
            }
        })
        .await
        .expect("subscribe");
    *slot.lock().unwrap() = Some(heads);

    assert!(notify_within(&transport, json!({"number": "0x1"}), Duration::from_secs(5)));
    assert!(notify_within(&transport, json!({"number": "0x2"}), Duration::from_secs(5)));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(SubscriptionEvent::Data(json!({"number": 1})), Some(false))]
    );
}

#[tokio::test(start_paused = true)]
async fn test_callback_drop_during_syncing_batch_stops_the_rest() {
    let transport = MockTransport::new();
    let client = EthClient::new(transport.clone());
    let slot: Slot = Arc::new(Mutex::new(None));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let syncing = client
        .subscribe_with_callback("syncing", vec![], {
            let slot = Arc::clone(&slot);
            let seen = Arc::clone(&seen);
            move |event| {
                seen.lock().unwrap().push(event.clone());
                drop(slot.lock().unwrap().take());
            }
        })
        .await
        .expect("subscribe");
    *slot.lock().unwrap() = Some(syncing);

    // One notification yields Changed(true) and Data; the callback closes after the first.
    transport.notify(0, syncing_notification(999, 1000));
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(
        *seen.lock().unwrap(),
        vec![SubscriptionEvent::Changed(json!(true))]
    );
}
