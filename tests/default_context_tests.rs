use ethwire::context::{ContextListener, DefaultContext, Defaults, ProviderConfig};
use ethwire::format::{BlockRef, BlockTag, parse_address};
use ethwire::{Address, FormatError};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

#[derive(Debug, PartialEq)]
enum Seen {
    Account(Option<Address>),
    Block(BlockRef),
    Provider(String),
}

#[derive(Default)]
struct RecordingListener {
    seen: Mutex<Vec<Seen>>,
}

impl RecordingListener {
    fn take(&self) -> Vec<Seen> {
        std::mem::take(&mut *self.seen.lock())
    }
}

impl ContextListener for RecordingListener {
    fn set_default_account(&self, account: Option<&Address>) {
        self.seen.lock().push(Seen::Account(account.copied()));
    }

    fn set_default_block(&self, block: &BlockRef) {
        self.seen.lock().push(Seen::Block(*block));
    }

    fn set_provider(&self, provider: &ProviderConfig) {
        self.seen.lock().push(Seen::Provider(provider.endpoint.clone()));
    }
}

#[test]
fn registration_pushes_current_defaults() {
    let context = DefaultContext::new(Defaults::new(None, BlockRef::Number(7)));
    let listener = Arc::new(RecordingListener::default());

    context.register_listener("contracts", listener.clone());

    assert_eq!(
        listener.take(),
        vec![Seen::Account(None), Seen::Block(BlockRef::Number(7))]
    );
}

#[test]
fn changed_fields_reach_every_listener_before_apply_returns() {
    let context = DefaultContext::default();
    let contracts = Arc::new(RecordingListener::default());
    let personal = Arc::new(RecordingListener::default());
    context.register_listener("contracts", contracts.clone());
    context.register_listener("personal", personal.clone());
    contracts.take();
    personal.take();

    let mut defaults = context.snapshot();
    defaults.set_default_account(CHECKSUMMED).expect("valid address");
    context.apply(defaults);

    let account = parse_address(CHECKSUMMED).expect("address");
    assert_eq!(contracts.take(), vec![Seen::Account(Some(account))]);
    assert_eq!(personal.take(), vec![Seen::Account(Some(account))]);
}

#[test]
fn unchanged_defaults_are_not_rebroadcast() {
    let context = DefaultContext::default();
    let listener = Arc::new(RecordingListener::default());
    context.register_listener("net", listener.clone());
    listener.take();

    context.apply(context.snapshot());

    assert!(listener.take().is_empty());
}

#[test]
fn provider_changes_are_broadcast() {
    let context = DefaultContext::default();
    let listener = Arc::new(RecordingListener::default());
    context.register_listener("net", listener.clone());
    listener.take();

    context.broadcast_provider(&ProviderConfig::new("ws://localhost:8546"));

    assert_eq!(
        listener.take(),
        vec![Seen::Provider("ws://localhost:8546".to_string())]
    );
}

#[test]
fn invalid_defaults_are_rejected() {
    let mut defaults = Defaults::default();

    assert_eq!(
        defaults.set_default_account("0x1234"),
        Err(FormatError::InvalidAddress("0x1234".to_string()))
    );
    assert!(matches!(
        defaults.set_default_block(&json!("yesterday")),
        Err(FormatError::InvalidBlockRef(_))
    ));
    assert_eq!(defaults, Defaults::default());
}

#[test]
fn empty_values_unset_defaults() {
    let mut defaults = Defaults::default();
    defaults.set_default_account(CHECKSUMMED).expect("valid address");
    defaults.set_default_block(&json!(12)).expect("valid block");

    defaults.set_default_account("").expect("unset account");
    defaults.set_default_block(&json!("")).expect("reset block");

    assert_eq!(defaults.default_account(), None);
    assert_eq!(defaults.default_block(), BlockRef::Tag(BlockTag::Latest));
}

#[test]
fn snapshots_are_not_affected_by_later_changes() {
    let context = DefaultContext::default();
    let before = context.snapshot();

    let mut defaults = context.snapshot();
    defaults.set_default_block(&json!("pending")).expect("valid block");
    context.apply(defaults);

    assert_eq!(before.default_block(), BlockRef::Tag(BlockTag::Latest));
    assert_eq!(
        context.snapshot().default_block(),
        BlockRef::Tag(BlockTag::Pending)
    );
}

#[test]
fn concurrent_updates_keep_every_field_and_broadcast_in_store_order() {
    let context = DefaultContext::default();
    let listener = Arc::new(RecordingListener::default());
    context.register_listener("contracts", listener.clone());
    listener.take();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for round in 0..500 {
                let account = if round % 2 == 0 { CHECKSUMMED } else { "" };
                context
                    .update(|defaults| defaults.set_default_account(account))
                    .expect("valid account");
            }
        });
        scope.spawn(|| {
            for block in 1..=500u64 {
                context
                    .update(|defaults| defaults.set_default_block(&json!(block)))
                    .expect("valid block");
            }
        });
    });

    let last_block = BlockRef::Number(500);
    assert_eq!(context.snapshot().default_block(), last_block);
    assert_eq!(context.snapshot().default_account(), None);

    let blocks: Vec<_> = listener
        .take()
        .into_iter()
        .filter_map(|seen| match seen {
            Seen::Block(BlockRef::Number(number)) => Some(number),
            _ => None,
        })
        .collect();
    assert_eq!(blocks, (1..=500).collect::<Vec<_>>());
}

#[test]
fn failed_update_stores_and_broadcasts_nothing() {
    let context = DefaultContext::new(Defaults::new(None, BlockRef::Number(3)));
    let listener = Arc::new(RecordingListener::default());
    context.register_listener("net", listener.clone());
    listener.take();

    let result = context.update(|defaults| defaults.set_default_block(&json!("yesterday")));

    assert!(matches!(result, Err(FormatError::InvalidBlockRef(_))));
    assert_eq!(context.snapshot().default_block(), BlockRef::Number(3));
    assert!(listener.take().is_empty());
}

struct ReentrantListener {
    context: Arc<DefaultContext>,
}

impl ContextListener for ReentrantListener {
    fn set_default_account(&self, account: Option<&Address>) {
        // Pin the block whenever an account is chosen.
        if account.is_some() {
            self.context
                .update(|defaults| defaults.set_default_block(&json!("pending")))
                .expect("valid block");
        }
    }
}

#[test]
fn listener_may_update_the_context_it_listens_to() {
    let context = Arc::new(DefaultContext::default());
    context.register_listener(
        "wallet",
        Arc::new(ReentrantListener {
            context: Arc::clone(&context),
        }),
    );

    context
        .update(|defaults| defaults.set_default_account(CHECKSUMMED))
        .expect("valid account");

    assert_eq!(
        context.snapshot().default_block(),
        BlockRef::Tag(BlockTag::Pending)
    );
    assert!(context.snapshot().default_account().is_some());
}
