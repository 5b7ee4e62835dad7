//! Seam to the external identity provider.
//!
//! Sign-in, tokens and session persistence live with the provider. The core
//! only asks who is signed in, if anyone.

use serde::{Deserialize, Serialize};

/// Opaque identity handed over by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name,
        }
    }
}

/// Anything that can report the currently authenticated user.
pub trait IdentitySource {
    /// `None` when signed out.
    fn current(&self) -> Option<Identity>;

    /// Display name of the current user, if the provider has one.
    fn display_name(&self) -> Option<String> {
        self.current().and_then(|i| i.display_name)
    }
}

/// Fixed answer, for callers that already resolved the identity.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Identity>);

impl IdentitySource for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_has_no_name() {
        assert!(StaticIdentity::default().display_name().is_none());
    }

    #[test]
    fn signed_in_exposes_display_name() {
        let source = StaticIdentity(Some(Identity::new("uid-1", Some("Ada".into()))));
        assert_eq!(source.display_name().as_deref(), Some("Ada"));
    }
}
