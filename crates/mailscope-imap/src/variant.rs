//! Known server ACL variants.
//!
//! ACL identifiers mean different things on different server families:
//! Cyrus-descended servers hand out principal names that are resolvable on
//! their own, while Courier-style servers scope identifiers to the folder and
//! need the folder's location to resolve them. The variant is selected once
//! at configuration time from the server identity string.

use thiserror::Error;

/// The closed set of server families with distinct ACL identifier semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerVariant {
    /// Cyrus-style: ACL identifiers are plain resolvable principal names.
    /// Dovecot behaves the same way.
    Cyrus,
    /// Courier-style: ACL identifiers are folder-scoped and need the session
    /// user, folder full name, and hierarchy separator to resolve.
    Courier,
}

impl ServerVariant {
    /// Selects the variant for a server identity string.
    ///
    /// Matching is case-insensitive on the server family name anywhere in
    /// the identity (`"Dovecot ready."` works as well as `"dovecot"`).
    ///
    /// # Errors
    ///
    /// Returns [`UnknownServerVariant`] when the identity names no known
    /// family. This is a configuration error for an operator, not a
    /// condition to fall back from silently.
    pub fn from_identity(identity: &str) -> Result<Self, UnknownServerVariant> {
        let lower = identity.to_lowercase();
        if lower.contains("cyrus") || lower.contains("dovecot") {
            Ok(Self::Cyrus)
        } else if lower.contains("courier") {
            Ok(Self::Courier)
        } else {
            Err(UnknownServerVariant {
                identity: identity.to_string(),
            })
        }
    }
}

/// The configured server identity matched no known ACL variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown server variant for identity `{identity}`")]
pub struct UnknownServerVariant {
    /// The identity string that failed to match.
    pub identity: String,
}
