//! The mailbox handle the transport layer implements.
//!
//! A handle wraps one mailbox on one connection. Connections are not safe
//! for concurrent protocol commands, so every round-trip method takes
//! `&mut self`; callers resolving many folders in parallel must use distinct
//! connections or serialize per connection.

use mailscope_imap::MailboxAttribute;

/// The folder type bits: what a mailbox may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderKind {
    holds_messages: bool,
    holds_folders: bool,
}

impl FolderKind {
    /// Creates a folder kind from its two type bits.
    #[must_use]
    pub const fn new(holds_messages: bool, holds_folders: bool) -> Self {
        Self {
            holds_messages,
            holds_folders,
        }
    }

    /// Returns true if the mailbox may contain messages.
    #[must_use]
    pub const fn holds_messages(self) -> bool {
        self.holds_messages
    }

    /// Returns true if the mailbox may contain sub-mailboxes.
    #[must_use]
    pub const fn holds_folders(self) -> bool {
        self.holds_folders
    }
}

/// One mailbox on one connection, as the transport exposes it.
///
/// Methods returning [`mailscope_imap::Result`] perform a protocol round
/// trip; the plain accessors answer from data the transport already holds.
/// [`MailboxHandle::attributes`] returning `Ok(None)` means the client
/// library has no extended LIST attributes for this mailbox (a degraded
/// capability, not an error) and triggers the engine's manual-listing
/// fallback.
///
/// The command methods return the raw untagged response lines; the engine
/// parses them itself with [`mailscope_imap::parser`]. Transports stay a
/// dumb pipe for these commands and carry no opinion about what the server
/// said.
#[allow(async_fn_in_trait)]
pub trait MailboxHandle {
    /// Full hierarchical name; empty for the root.
    fn full_name(&self) -> &str;

    /// Last hierarchy component of the name.
    fn name(&self) -> &str;

    /// Hierarchy separator character.
    fn separator(&self) -> char;

    /// The folder type bits.
    fn kind(&self) -> FolderKind;

    /// Full name of the parent mailbox, absent for the root and top-level
    /// mailboxes.
    fn parent_full_name(&self) -> Option<&str>;

    /// Whether the mailbox exists on the server.
    async fn exists(&mut self) -> mailscope_imap::Result<bool>;

    /// Extended LIST attributes, or `None` when unavailable.
    async fn attributes(&mut self) -> mailscope_imap::Result<Option<Vec<MailboxAttribute>>>;

    /// Whether the mailbox is subscribed.
    async fn is_subscribed(&mut self) -> mailscope_imap::Result<bool>;

    /// Total number of messages.
    async fn message_count(&mut self) -> mailscope_imap::Result<u32>;

    /// Number of recent messages.
    async fn new_message_count(&mut self) -> mailscope_imap::Result<u32>;

    /// Number of unseen messages.
    async fn unread_message_count(&mut self) -> mailscope_imap::Result<u32>;

    /// Number of messages flagged \Deleted.
    async fn deleted_message_count(&mut self) -> mailscope_imap::Result<u32>;

    /// Flags the server accepts permanently, `"\\*"` meaning arbitrary
    /// client-defined keywords.
    async fn permanent_flags(&mut self) -> mailscope_imap::Result<Vec<String>>;

    /// Executes a raw `LIST` command, returning the untagged response lines.
    async fn list(&mut self, reference: &str, pattern: &str)
    -> mailscope_imap::Result<Vec<String>>;

    /// Executes a raw `LSUB` command, returning the untagged response lines.
    async fn lsub(&mut self, reference: &str, pattern: &str)
    -> mailscope_imap::Result<Vec<String>>;

    /// Executes `MYRIGHTS` for this mailbox, returning the untagged
    /// response line.
    async fn my_rights(&mut self) -> mailscope_imap::Result<String>;

    /// Executes `GETACL` for this mailbox, returning the untagged response
    /// line.
    async fn get_acl(&mut self) -> mailscope_imap::Result<String>;

    /// Executes `NAMESPACE`, returning the untagged response line.
    async fn namespaces(&mut self) -> mailscope_imap::Result<String>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_bits() {
        let kind = FolderKind::new(true, false);
        assert!(kind.holds_messages());
        assert!(!kind.holds_folders());
    }
}
