//! Memoization for repeat folder resolutions.
//!
//! Two lifetimes exist here. [`ConnectionCaches`] belongs to one connection
//! and dies with it; its staleness window is exactly "same connection
//! session", no timers. [`CapabilityRegistry`] is shared process-wide across
//! connections and only ever learns; it is owned by the connection-pool layer
//! and injected into resolutions rather than reached as ambient state.
//!
//! Both are locked maps. Two resolutions racing to populate the same key
//! with equal values is harmless; the locks only prevent corruption. Locks
//! are never held across an await.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use mailscope_imap::{Namespaces, Rights};

/// Per-connection memoization: MYRIGHTS results, advertised namespaces, and
/// user-flag support, keyed by mailbox full name where applicable.
#[derive(Debug, Default)]
pub struct ConnectionCaches {
    rights: Mutex<HashMap<String, Rights>>,
    namespaces: Mutex<Option<Namespaces>>,
    user_flags: Mutex<HashMap<String, bool>>,
}

impl ConnectionCaches {
    /// Creates empty caches for a fresh connection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized MYRIGHTS result for a mailbox.
    #[must_use]
    pub fn rights(&self, full_name: &str) -> Option<Rights> {
        self.rights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(full_name)
            .cloned()
    }

    /// Memoizes a MYRIGHTS result.
    pub fn store_rights(&self, full_name: &str, rights: Rights) {
        self.rights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(full_name.to_string(), rights);
    }

    /// Returns the memoized namespace lists.
    #[must_use]
    pub fn namespaces(&self) -> Option<Namespaces> {
        self.namespaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Memoizes the namespace lists.
    pub fn store_namespaces(&self, namespaces: Namespaces) {
        *self
            .namespaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(namespaces);
    }

    /// Returns the memoized user-flag support for a mailbox.
    #[must_use]
    pub fn user_flags(&self, full_name: &str) -> Option<bool> {
        self.user_flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(full_name)
            .copied()
    }

    /// Memoizes user-flag support for a mailbox.
    pub fn store_user_flags(&self, full_name: &str, supported: bool) {
        self.user_flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(full_name.to_string(), supported);
    }
}

/// What has been learned about one server.
#[derive(Debug, Clone, Copy, Default)]
struct ServerCapabilities {
    restrictive_acl_extension: bool,
}

/// Cross-connection registry of learned server behavior, keyed by server
/// identity.
///
/// Once a server is observed to reject GETACL without ADMINISTER rights, the
/// flag is set here and subsequent folders on that server skip the doomed
/// call. Entries are created lazily and never torn down; distinct server
/// identities are bounded in practice.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    servers: Mutex<HashMap<String, ServerCapabilities>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the server is known to reject GETACL without
    /// ADMINISTER rights.
    #[must_use]
    pub fn has_restrictive_acl(&self, identity: &str) -> bool {
        self.servers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identity)
            .is_some_and(|caps| caps.restrictive_acl_extension)
    }

    /// Records that the server rejects GETACL without ADMINISTER rights.
    pub fn note_restrictive_acl(&self, identity: &str) {
        self.servers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(identity.to_string())
            .or_default()
            .restrictive_acl_extension = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn rights_cache_round_trip() {
        let caches = ConnectionCaches::new();
        assert!(caches.rights("INBOX").is_none());

        caches.store_rights("INBOX", Rights::parse("lr"));
        assert_eq!(caches.rights("INBOX"), Some(Rights::parse("lr")));
        assert!(caches.rights("INBOX/Sub").is_none());
    }

    #[test]
    fn namespace_cache_round_trip() {
        let caches = ConnectionCaches::new();
        assert!(caches.namespaces().is_none());

        caches.store_namespaces(Namespaces::default());
        assert_eq!(caches.namespaces(), Some(Namespaces::default()));
    }

    #[test]
    fn registry_learns_once_per_server() {
        let registry = CapabilityRegistry::new();
        assert!(!registry.has_restrictive_acl("imap.example.com"));

        registry.note_restrictive_acl("imap.example.com");
        assert!(registry.has_restrictive_acl("imap.example.com"));
        assert!(!registry.has_restrictive_acl("other.example.com"));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        let registry = Arc::new(CapabilityRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let identity = format!("server-{}", i % 2);
                    registry.note_restrictive_acl(&identity);
                    assert!(registry.has_restrictive_acl(&identity));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(registry.has_restrictive_acl("server-0"));
        assert!(registry.has_restrictive_acl("server-1"));
    }
}
