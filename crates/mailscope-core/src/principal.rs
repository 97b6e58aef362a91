//! ACL principal resolution.
//!
//! GETACL names principals the way the server spells them; the permission
//! model wants internal entity identifiers. Resolution is an external
//! concern (a user directory), but the argument bundle a resolver needs
//! depends on the server variant: Cyrus-style identifiers resolve on their
//! own, Courier-style identifiers only make sense together with the folder
//! they were read from.

use mailscope_imap::ServerVariant;
use thiserror::Error;

use crate::session::Session;

/// An internal permission entity: a user or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Internal entity identifier.
    pub entity_id: u32,
    /// True when the entity is a group.
    pub is_group: bool,
}

/// Variant-specific arguments for resolving one ACL identifier.
///
/// One constructor per variant; the variant is chosen once at configuration
/// time, never per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityArgs {
    /// Cyrus-style: the identifier is self-contained.
    Plain,
    /// Courier-style: the identifier is scoped to the folder it was read
    /// from.
    FolderScoped {
        /// The session user on whose behalf the folder is being resolved.
        user_id: u32,
        /// Full name of the folder the ACL belongs to.
        full_name: String,
        /// Hierarchy separator of that folder.
        separator: char,
    },
}

impl EntityArgs {
    /// Builds the argument bundle for a server variant.
    #[must_use]
    pub fn for_variant(
        variant: ServerVariant,
        session: &Session,
        full_name: &str,
        separator: char,
    ) -> Self {
        match variant {
            ServerVariant::Cyrus => Self::Plain,
            ServerVariant::Courier => Self::FolderScoped {
                user_id: session.user_id,
                full_name: full_name.to_string(),
                separator,
            },
        }
    }
}

/// Why an ACL identifier could not be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalError {
    /// The identifier names no known entity, typically a deleted user still
    /// present in the ACL. The single entry is dropped, translation of the
    /// remaining entries continues.
    #[error("unknown principal `{0}`")]
    UnknownPrincipal(String),

    /// Resolution itself failed. Aborts ACL translation for the folder.
    #[error("principal resolution failed: {0}")]
    Failure(String),
}

/// Maps protocol-level ACL identifiers to internal entities.
#[allow(async_fn_in_trait)]
pub trait PrincipalResolver {
    /// Resolves one ACL identifier.
    ///
    /// # Errors
    ///
    /// [`PrincipalError::UnknownPrincipal`] when the identifier names no
    /// known entity, [`PrincipalError::Failure`] on any other failure.
    async fn resolve(
        &self,
        identifier: &str,
        args: &EntityArgs,
    ) -> std::result::Result<Principal, PrincipalError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cyrus_needs_no_arguments() {
        let session = Session::new(17, 3);
        let args = EntityArgs::for_variant(ServerVariant::Cyrus, &session, "INBOX/Work", '/');
        assert_eq!(args, EntityArgs::Plain);
    }

    #[test]
    fn courier_carries_folder_scope() {
        let session = Session::new(17, 3);
        let args = EntityArgs::for_variant(ServerVariant::Courier, &session, "INBOX.Work", '.');
        assert_eq!(
            args,
            EntityArgs::FolderScoped {
                user_id: 17,
                full_name: "INBOX.Work".to_string(),
                separator: '.',
            }
        );
    }
}
