use crate::{EthClientConfig, MethodInvoker, Subscription, SubscriptionManager, Transport, TransportSlot};
use ethwire::context::{ContextListener, DefaultContext, ProviderConfig};
use ethwire::format::BlockRef;
use ethwire::method::MethodRegistry;
use ethwire::subscription::{SubscriptionEvent, SubscriptionRegistry, SyncStatus};
use ethwire::{Address, DecodeError, EthWireResult};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// The owning client: transport, registries, defaults and collaborators.
pub struct EthClient {
    context: Arc<DefaultContext>,
    transport: Arc<TransportSlot>,
    invoker: MethodInvoker,
    subscriptions: SubscriptionManager,
}

impl EthClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, EthClientConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: EthClientConfig) -> Self {
        Self::with_registries(
            transport,
            config,
            MethodRegistry::eth(),
            SubscriptionRegistry::eth(),
        )
    }

    /// Builds a client over custom registries. Both are frozen from here on.
    pub fn with_registries(
        transport: Arc<dyn Transport>,
        config: EthClientConfig,
        methods: MethodRegistry,
        subscriptions: SubscriptionRegistry,
    ) -> Self {
        let context = Arc::new(DefaultContext::default());
        let transport = Arc::new(TransportSlot::new(transport));
        let invoker = MethodInvoker::new(
            Arc::new(methods),
            Arc::clone(&context),
            Arc::clone(&transport),
        );
        let subscriptions = SubscriptionManager::new(
            Arc::new(subscriptions),
            Arc::clone(&context),
            Arc::clone(&transport),
            invoker.clone(),
            config.syncing,
        );

        Self {
            context,
            transport,
            invoker,
            subscriptions,
        }
    }

    pub fn invoker(&self) -> &MethodInvoker {
        &self.invoker
    }

    pub fn subscriptions(&self) -> &SubscriptionManager {
        &self.subscriptions
    }

    /// Registers a collaborator that mirrors this client's defaults and provider.
    pub fn register_collaborator(&self, name: &str, listener: Arc<dyn ContextListener>) {
        self.context.register_listener(name, listener);
    }

    pub fn default_account(&self) -> Option<Address> {
        self.context.snapshot().default_account().copied()
    }

    /// Sets the default account. An empty string unsets it; anything else must be a valid
    /// address. Collaborators are updated before this returns.
    pub fn set_default_account(&self, account: &str) -> EthWireResult<()> {
        self.context
            .update(|defaults| defaults.set_default_account(account))?;
        Ok(())
    }

    pub fn default_block(&self) -> BlockRef {
        self.context.snapshot().default_block()
    }

    /// Sets the default block. `null`, `false` and `""` reset it to `latest`.
    pub fn set_default_block(&self, block: impl Into<Value>) -> EthWireResult<()> {
        let block = block.into();
        self.context
            .update(|defaults| defaults.set_default_block(&block))?;
        Ok(())
    }

    /// Switches to a new provider and forwards its config to every collaborator.
    pub fn set_provider(&self, provider: ProviderConfig, transport: Arc<dyn Transport>) {
        self.transport.replace(transport);
        debug!(endpoint = %provider.endpoint, "provider changed");
        self.context.broadcast_provider(&provider);
    }

    pub async fn invoke(&self, name: &str, args: Vec<Value>) -> EthWireResult<Value> {
        self.invoker.invoke(name, args).await
    }

    pub async fn subscribe(&self, name: &str, args: Vec<Value>) -> EthWireResult<Subscription> {
        self.subscriptions.subscribe(name, args).await
    }

    pub async fn subscribe_with_callback<F>(
        &self,
        name: &str,
        args: Vec<Value>,
        callback: F,
    ) -> EthWireResult<Subscription>
    where
        F: FnMut(&SubscriptionEvent) + Send + 'static,
    {
        self.subscriptions
            .subscribe_with_callback(name, args, callback)
            .await
    }

    pub async fn unsubscribe(&self, subscription: &Subscription) -> EthWireResult<()> {
        self.subscriptions.unsubscribe(subscription).await
    }

    pub async fn get_block_number(&self) -> EthWireResult<u64> {
        let number = self.invoke("getBlockNumber", vec![]).await?;
        as_u64(number)
    }

    pub async fn get_chain_id(&self) -> EthWireResult<u64> {
        let chain_id = self.invoke("getChainId", vec![]).await?;
        as_u64(chain_id)
    }

    pub async fn is_syncing(&self) -> EthWireResult<SyncStatus> {
        let status = self.invoke("isSyncing", vec![]).await?;
        Ok(SyncStatus::from_value(&status)?)
    }

    /// Balance in wei as a decimal string. `None` uses the default block.
    pub async fn get_balance(&self, address: &str, block: Option<BlockRef>) -> EthWireResult<Value> {
        let block = block.map_or(Value::Null, |block| block.to_wire());
        self.invoke("getBalance", vec![json!(address), block]).await
    }

    pub async fn get_block(
        &self,
        block: impl Into<Value>,
        include_transactions: bool,
    ) -> EthWireResult<Value> {
        self.invoke("getBlock", vec![block.into(), json!(include_transactions)])
            .await
    }

    /// Signs `message` with `address` (`eth_sign`).
    pub async fn sign(&self, message: &str, address: &str) -> EthWireResult<Value> {
        self.invoke("sign", vec![json!(message), json!(address)]).await
    }

    pub async fn get_past_logs(&self, filter: Value) -> EthWireResult<Value> {
        self.invoke("getPastLogs", vec![filter]).await
    }
}

fn as_u64(value: Value) -> EthWireResult<u64> {
    value.as_u64().ok_or_else(|| {
        DecodeError::UnexpectedShape {
            expected: "number",
            got: value.to_string(),
        }
        .into()
    })
}
