// ── In-memory grant recorder ──

use std::sync::{Mutex, PoisonError};

use secrecy::{ExposeSecret, SecretString};

use crate::directive::Grant;
use crate::ports::{DeviceError, GrantRecorder};

/// A grant as kept by [`InMemoryGrants`]. The code stays wrapped.
#[derive(Debug)]
pub struct StoredGrant {
    pub grant_type: String,
    pub code: SecretString,
}

/// Keeps every accepted grant for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryGrants {
    grants: Mutex<Vec<StoredGrant>>,
}

impl InMemoryGrants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.grants.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` over the most recent grant, if any.
    pub fn with_latest<T>(&self, f: impl FnOnce(&StoredGrant) -> T) -> Option<T> {
        let grants = self.grants.lock().unwrap_or_else(PoisonError::into_inner);
        grants.last().map(f)
    }
}

impl GrantRecorder for InMemoryGrants {
    fn record(&self, grant: &Grant) -> Result<(), DeviceError> {
        let stored = StoredGrant {
            grant_type: grant.grant_type.clone(),
            code: SecretString::from(grant.code.expose_secret().to_owned()),
        };
        self.grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(stored);
        Ok(())
    }
}
