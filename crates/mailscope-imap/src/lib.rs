//! # mailscope-imap
//!
//! Wire-level IMAP types for the mailscope folder engine: access rights
//! (RFC 2086 / RFC 4314), ACL entries, mailbox names and LIST attributes
//! (RFC 3501 / RFC 5258), namespaces (RFC 2342), and lenient parsers for the
//! raw untagged response lines the engine reads back from its LIST/LSUB,
//! GETACL, MYRIGHTS, and NAMESPACE commands.
//!
//! This crate performs no I/O. The engine in `mailscope-core` drives a
//! transport-owned mailbox handle and uses these types to interpret what the
//! server said.
//!
//! ## Modules
//!
//! - [`parser`]: Response-line parsers for LIST/LSUB, ACL, MYRIGHTS, NAMESPACE
//! - [`types`]: Rights, ACL entries, mailbox names, attributes, namespaces
//! - [`variant`]: Closed set of known server ACL variants

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod parser;
pub mod types;
pub mod variant;

pub use error::{Error, Result};
pub use types::{
    AclEntry, ListEntry, MailboxAttribute, MailboxName, NamespaceEntry, Namespaces, Right, Rights,
};
pub use variant::{ServerVariant, UnknownServerVariant};
