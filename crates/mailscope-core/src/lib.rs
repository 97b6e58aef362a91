//! # mailscope-core
//!
//! The IMAP folder metadata and access-control resolution engine: turns a raw
//! mailbox handle into a fully populated, internally consistent
//! [`FolderDescriptor`]: existence, hierarchy attributes, subscription state,
//! message counters, effective permissions, and default-folder classification.
//!
//! The engine reconciles partially overlapping protocol signals (LIST/LSUB
//! attributes, ACL entries, MYRIGHTS, server quirks) into one permission
//! model, tolerates servers that implement the ACL extension badly, and never
//! lets a single folder's metadata failure abort anything beyond that folder.
//!
//! ## Quick start
//!
//! ```ignore
//! use mailscope_core::{
//!     CapabilityRegistry, ConnectionCaches, FolderResolver, ServerConfig, Session,
//! };
//!
//! # async fn example(
//! #     mut handle: impl mailscope_core::MailboxHandle,
//! #     principals: impl mailscope_core::PrincipalResolver,
//! # ) -> mailscope_core::Result<()> {
//! let session = Session::new(17, 3);
//! let config = ServerConfig::detect("Dovecot ready.", true)?;
//! let caches = ConnectionCaches::new();
//! let registry = CapabilityRegistry::new();
//!
//! let resolver = FolderResolver::new(&session, &config, &caches, &registry, &principals);
//! let descriptor = resolver.resolve(&mut handle).await?;
//! println!("{} subscribed={}", descriptor.full_name, descriptor.subscribed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: Per-connection memoization and the cross-connection
//!   server-capability registry
//! - [`handle`]: The mailbox handle trait the transport layer implements
//! - [`model`]: The resolved output model (descriptor and permissions)
//! - [`principal`]: ACL principal resolution and per-variant argument bundles
//! - [`resolve`]: The resolution pipeline and its stages
//! - [`session`]: Session and server configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cache;
mod error;
pub mod handle;
pub mod model;
pub mod principal;
pub mod resolve;
pub mod session;

pub use cache::{CapabilityRegistry, ConnectionCaches};
pub use error::{Error, Result};
pub use handle::{FolderKind, MailboxHandle};
pub use model::{FolderAccess, FolderDescriptor, ObjectAccess, Permission};
pub use principal::{EntityArgs, Principal, PrincipalError, PrincipalResolver};
pub use resolve::FolderResolver;
pub use session::{AclSupport, ServerConfig, Session};
