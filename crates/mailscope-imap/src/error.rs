//! Error types for wire-level IMAP operations.

use thiserror::Error;

/// Errors that can occur while executing or interpreting an IMAP command.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error on the underlying connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned NO response.
    #[error("Server returned NO: {0}")]
    No(String),

    /// Server returned BAD response.
    #[error("Server returned BAD: {0}")]
    Bad(String),

    /// Response line could not be parsed.
    #[error("Protocol parse error at position {position}: {message}")]
    Parse {
        /// Byte position where the error occurred.
        position: usize,
        /// Description of what went wrong.
        message: String,
    },
}

impl Error {
    /// Returns true if this is a connection-level failure rather than a
    /// command-level refusal.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns true if the server refused the command because the mailbox
    /// does not exist (seen with MYRIGHTS on shared folders mid-rename).
    #[must_use]
    pub fn is_mailbox_missing(&self) -> bool {
        match self {
            Self::No(text) => {
                let upper = text.to_uppercase();
                upper.contains("NONEXISTENT")
                    || upper.contains("DOES NOT EXIST")
                    || upper.contains("NO SUCH MAILBOX")
            }
            _ => false,
        }
    }

    /// Returns true if the server refused the command because the caller
    /// lacks the ADMINISTER right (restrictive ACL extensions reject GETACL
    /// outright for non-admins).
    #[must_use]
    pub fn requires_administer(&self) -> bool {
        match self {
            Self::No(text) => {
                let upper = text.to_uppercase();
                upper.contains("ADMIN") || upper.contains("ACL \"A\"")
            }
            _ => false,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_missing_detection() {
        let err = Error::No("Mailbox does not exist".to_string());
        assert!(err.is_mailbox_missing());

        let err = Error::No("[NONEXISTENT] Unknown mailbox".to_string());
        assert!(err.is_mailbox_missing());

        let err = Error::No("Permission denied".to_string());
        assert!(!err.is_mailbox_missing());
    }

    #[test]
    fn requires_administer_detection() {
        let err = Error::No("Missing required ACL \"a\" right".to_string());
        assert!(err.requires_administer());

        let err = Error::No("You must have administer rights".to_string());
        assert!(err.requires_administer());

        let err = Error::Bad("Invalid command".to_string());
        assert!(!err.requires_administer());
    }

    #[test]
    fn transport_classification() {
        let err = Error::Io(std::io::Error::other("broken pipe"));
        assert!(err.is_transport());

        let err = Error::No("whatever".to_string());
        assert!(!err.is_transport());
    }
}
