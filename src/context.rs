mod context_listener;
mod default_context;
mod defaults;
mod provider_config;

pub use context_listener::ContextListener;
pub use default_context::DefaultContext;
pub use defaults::Defaults;
pub use provider_config::ProviderConfig;
