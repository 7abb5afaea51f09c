//! Identity adapter.
//!
//! The core does not implement authentication; it only needs a stable user
//! id to key persistence lookups. The provider trait keeps the source of
//! that id pluggable (config file, CLI flag, a real auth service).

use crate::{Error, Result};

/// Source of the current user's stable identifier
pub trait IdentityProvider {
    fn current_user_id(&self) -> Result<String>;
}

/// Identity fixed at construction time (from config or a CLI flag)
#[derive(Clone, Debug)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Result<String> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Unauthenticated);
        }
        Ok(self.user_id.clone())
    }
}
