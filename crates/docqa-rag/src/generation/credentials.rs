//! Process-wide default API key

use parking_lot::RwLock;

/// Thread-safe holder for the default backend credential.
///
/// Requests read a snapshot; the settings endpoint replaces the value
/// atomically. Per-request keys never pass through here.
#[derive(Debug, Default)]
pub struct CredentialStore {
    default: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Create a store, ignoring blank keys
    pub fn new(default: Option<String>) -> Self {
        Self {
            default: RwLock::new(default.and_then(normalize)),
        }
    }

    /// Current default credential
    pub fn get(&self) -> Option<String> {
        self.default.read().clone()
    }

    /// Replace the default credential; blank input clears it
    pub fn set(&self, credential: impl Into<String>) {
        *self.default.write() = normalize(credential.into());
    }

    /// Whether a default credential is configured
    pub fn is_configured(&self) -> bool {
        self.default.read().is_some()
    }

    /// Pick the credential for one call: a non-blank override wins, otherwise
    /// the current default
    pub fn resolve(&self, override_credential: Option<&str>) -> Option<String> {
        override_credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| self.get())
    }
}

fn normalize(credential: String) -> Option<String> {
    let trimmed = credential.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
