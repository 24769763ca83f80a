use serde::{Deserialize, Serialize};

/// Describes the node endpoint a client talks to. Forwarded to collaborators whenever the
/// owning client switches provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
}

impl ProviderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}
