//! Core wire-level types.

mod acl;
mod mailbox;
mod namespace;
mod rights;

pub use acl::AclEntry;
pub use mailbox::{ListEntry, MailboxAttribute, MailboxName};
pub use namespace::{NamespaceEntry, Namespaces};
pub use rights::{Right, Rights};
