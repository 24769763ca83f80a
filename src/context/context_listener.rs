use super::ProviderConfig;
use crate::format::BlockRef;
use alloy_primitives::Address;

/// A collaborator (contract factory, personal accounts, net, ...) that mirrors the owning
/// client's defaults and provider.
///
/// Listeners are notified synchronously, before the client's setter returns.
pub trait ContextListener: Send + Sync {
    fn set_default_account(&self, _account: Option<&Address>) {}

    fn set_default_block(&self, _block: &BlockRef) {}

    fn set_provider(&self, _provider: &ProviderConfig) {}
}
