//! Session and server configuration.

use mailscope_imap::{ServerVariant, UnknownServerVariant};

/// The principal context a resolution runs under.
#[derive(Debug, Clone)]
pub struct Session {
    /// Internal identifier of the current user.
    pub user_id: u32,
    /// Internal identifier of the user's context.
    pub context_id: u32,
    /// Whether the subscription feature is enabled for this session.
    pub subscriptions_enabled: bool,
    /// Whether user-defined message flags are enabled for this session.
    pub user_flags_enabled: bool,
    /// Precomputed full names of the session's default folders (Sent,
    /// Drafts, Trash, ...), when the surrounding system has computed them.
    /// Absent means default-folder classification stays unevaluated.
    pub default_folder_names: Option<Vec<String>>,
}

impl Session {
    /// Creates a session with both features enabled and no default-folder
    /// table.
    #[must_use]
    pub const fn new(user_id: u32, context_id: u32) -> Self {
        Self {
            user_id,
            context_id,
            subscriptions_enabled: true,
            user_flags_enabled: true,
            default_folder_names: None,
        }
    }

    /// Sets the default-folder-name table.
    #[must_use]
    pub fn with_default_folders(mut self, names: Vec<String>) -> Self {
        self.default_folder_names = Some(names);
        self
    }

    /// Looks a full name up in the default-folder table.
    ///
    /// `None` means the table is absent and classification cannot be
    /// performed; `Some(false)` is a definite "not a default folder".
    #[must_use]
    pub fn is_default_folder(&self, full_name: &str) -> Option<bool> {
        self.default_folder_names
            .as_ref()
            .map(|names| names.iter().any(|name| name == full_name))
    }
}

/// Whether and how the server supports ACLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclSupport {
    /// No ACL extension. Legacy behavior: such servers are assumed to grant
    /// everything.
    Unsupported,
    /// ACL extension present, identifiers resolved per the given variant.
    Supported(ServerVariant),
}

/// Server-wide configuration a resolution runs against.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server identity string; keys the capability registry.
    pub identity: String,
    /// ACL support and variant.
    pub acl: AclSupport,
    /// Whether subscription semantics are honored. When false, every folder
    /// counts as subscribed.
    pub honor_subscriptions: bool,
}

impl ServerConfig {
    /// Creates a configuration with explicit ACL support.
    #[must_use]
    pub fn new(identity: impl Into<String>, acl: AclSupport, honor_subscriptions: bool) -> Self {
        Self {
            identity: identity.into(),
            acl,
            honor_subscriptions,
        }
    }

    /// Creates a configuration by detecting the ACL variant from the server
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownServerVariant`] when the identity names no known
    /// server family.
    pub fn detect(
        identity: impl Into<String>,
        honor_subscriptions: bool,
    ) -> Result<Self, UnknownServerVariant> {
        let identity = identity.into();
        let variant = ServerVariant::from_identity(&identity)?;
        Ok(Self {
            identity,
            acl: AclSupport::Supported(variant),
            honor_subscriptions,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_folder_lookup_tristate() {
        let session = Session::new(1, 1);
        assert_eq!(session.is_default_folder("INBOX/Sent"), None);

        let session = session.with_default_folders(vec!["INBOX/Sent".to_string()]);
        assert_eq!(session.is_default_folder("INBOX/Sent"), Some(true));
        assert_eq!(session.is_default_folder("INBOX/Other"), Some(false));
    }

    #[test]
    fn detect_selects_variant_once() {
        let config = ServerConfig::detect("Cyrus IMAP v3", true).unwrap();
        assert_eq!(config.acl, AclSupport::Supported(ServerVariant::Cyrus));

        assert!(ServerConfig::detect("homegrown", true).is_err());
    }
}
