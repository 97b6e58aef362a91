//! Error types for the resolution engine.
//!
//! Only genuinely fatal conditions surface here. Degraded-but-expected
//! conditions (MYRIGHTS refused, GETACL forbidden without ADMINISTER, a
//! single ACL entry naming a deleted user) are recovered inside the
//! pipeline and logged; the caller still gets a descriptor with conservative
//! values rather than an error.

use thiserror::Error;

/// Fatal errors a folder resolution can end with.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection or protocol-level failure while reading mandatory folder
    /// data. Without those no descriptor can be produced at all.
    #[error("transport failure: {0}")]
    Transport(#[source] mailscope_imap::Error),

    /// The server refused the existence check or the manual LIST/LSUB
    /// listing. Hierarchy attributes are mandatory input, so the resolution
    /// fails, but the connection itself is fine.
    #[error("folder listing failed: {0}")]
    Listing(#[source] mailscope_imap::Error),

    /// GETACL failed although the caller holds the ADMINISTER right. A
    /// privileged caller refused is a real server problem, not the usual
    /// capability gap, so it is not papered over with a synthesized list.
    #[error("ACL retrieval failed: {0}")]
    AclRetrieval(#[source] mailscope_imap::Error),

    /// The configured server identity matches no known ACL variant. An
    /// operator has to fix the configuration; retrying cannot help.
    #[error(transparent)]
    UnknownServerVariant(#[from] mailscope_imap::UnknownServerVariant),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn transport_wraps_wire_error() {
        let err = Error::Transport(mailscope_imap::Error::Io(std::io::Error::other(
            "connection reset",
        )));
        assert!(err.to_string().contains("transport failure"));
    }

    #[test]
    fn unknown_variant_is_transparent() {
        let source = mailscope_imap::ServerVariant::from_identity("mystery").unwrap_err();
        let err = Error::from(source);
        assert!(err.to_string().contains("mystery"));
    }
}
