//! In-memory credential storage.
//!
//! Holds the current access credential and the authenticated-identity marker.
//! Both live and die together: login writes them as a pair, logout and refresh
//! failure clear them as a pair. Nothing here touches the network or disk -
//! persistence beyond process lifetime is deliberately absent.

use parking_lot::RwLock;

/// Minimal descriptor of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    credential: String,
    identity: Identity,
}

/// Process-wide holder for the bearer credential.
///
/// Mutated only by the session lifecycle (login/logout) and by the
/// single-flight refresh body; everyone else reads.
#[derive(Debug, Default)]
pub(crate) struct CredentialStore {
    slot: RwLock<Option<Slot>>,
}

impl CredentialStore {
    /// Current access credential, if a session is live.
    pub(crate) fn read(&self) -> Option<String> {
        self.slot.read().as_ref().map(|s| s.credential.clone())
    }

    /// Identity marker for the live session.
    pub(crate) fn identity(&self) -> Option<Identity> {
        self.slot.read().as_ref().map(|s| s.identity.clone())
    }

    /// Install a fresh credential+identity pair (login path).
    pub(crate) fn write(&self, credential: String, identity: Identity) {
        *self.slot.write() = Some(Slot {
            credential,
            identity,
        });
    }

    /// Replace only the credential, keeping the identity (refresh path).
    /// A session signed out mid-refresh stays signed out.
    pub(crate) fn set_credential(&self, credential: String) {
        if let Some(slot) = self.slot.write().as_mut() {
            slot.credential = credential;
        }
    }

    /// Drop the credential and identity together.
    pub(crate) fn clear(&self) {
        *self.slot.write() = None;
    }
}
