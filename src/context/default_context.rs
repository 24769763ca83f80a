use super::{ContextListener, Defaults, ProviderConfig};
use parking_lot::{ReentrantMutex, RwLock};
use std::sync::Arc;
use tracing::debug;

type NamedListener = (String, Arc<dyn ContextListener>);

/// Holds the client's current [`Defaults`] and the collaborators that mirror them.
///
/// Every change goes through `changes`: the edit, the store and the broadcast happen as
/// one step, so concurrent setters never lose each other's fields and listeners see
/// values in the order they were stored. The lock is reentrant, so a listener may
/// itself update the context.
#[derive(Default)]
pub struct DefaultContext {
    changes: ReentrantMutex<()>,
    defaults: RwLock<Defaults>,
    listeners: RwLock<Vec<NamedListener>>,
}

impl DefaultContext {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            changes: ReentrantMutex::new(()),
            defaults: RwLock::new(defaults),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Registers a collaborator and brings it up to date with the current defaults.
    pub fn register_listener(&self, name: impl Into<String>, listener: Arc<dyn ContextListener>) {
        let _changes = self.changes.lock();

        let name = name.into();
        let current = self.snapshot();
        listener.set_default_account(current.default_account());
        listener.set_default_block(&current.default_block());

        debug!(listener = %name, "context listener registered");
        self.listeners.write().push((name, listener));
    }

    pub fn snapshot(&self) -> Defaults {
        self.defaults.read().clone()
    }

    /// Edits the stored defaults in place and pushes every changed field to all
    /// listeners. Nothing is stored or broadcast when `edit` fails.
    ///
    /// Returns only once every listener has been updated.
    pub fn update<E>(&self, edit: impl FnOnce(&mut Defaults) -> Result<(), E>) -> Result<(), E> {
        let _changes = self.changes.lock();

        let previous = self.snapshot();
        let mut next = previous.clone();
        edit(&mut next)?;
        *self.defaults.write() = next.clone();

        self.broadcast(&previous, &next);
        Ok(())
    }

    /// Replaces the defaults wholesale. See [`DefaultContext::update`].
    pub fn apply(&self, defaults: Defaults) {
        let _ = self.update(|current| {
            *current = defaults;
            Ok::<(), std::convert::Infallible>(())
        });
    }

    pub fn broadcast_provider(&self, provider: &ProviderConfig) {
        let _changes = self.changes.lock();

        for (name, listener) in self.listeners() {
            debug!(listener = %name, endpoint = %provider.endpoint, "broadcasting provider");
            listener.set_provider(provider);
        }
    }

    fn broadcast(&self, previous: &Defaults, next: &Defaults) {
        let account_changed = previous.default_account() != next.default_account();
        let block_changed = previous.default_block() != next.default_block();
        if !account_changed && !block_changed {
            return;
        }

        for (name, listener) in self.listeners() {
            if account_changed {
                debug!(listener = %name, account = ?next.default_account(), "broadcasting default account");
                listener.set_default_account(next.default_account());
            }
            if block_changed {
                debug!(listener = %name, block = %next.default_block(), "broadcasting default block");
                listener.set_default_block(&next.default_block());
            }
        }
    }

    // Listeners are cloned out so a listener may call back into the context.
    fn listeners(&self) -> Vec<NamedListener> {
        self.listeners.read().clone()
    }
}
