//! ACL-to-permission translation.
//!
//! The decision order matters. A server already known to reject GETACL for
//! non-admins never gets asked again; a server observed rejecting it for the
//! first time teaches the capability registry; an unrecognized principal
//! drops its single entry; anything else unexpected aborts translation and
//! falls back to a list containing only the caller's own rights.

use mailscope_imap::{parser, Rights};
use tracing::{debug, warn};

use crate::cache::CapabilityRegistry;
use crate::handle::{FolderKind, MailboxHandle};
use crate::model::Permission;
use crate::principal::{EntityArgs, PrincipalError, PrincipalResolver};
use crate::session::{AclSupport, ServerConfig, Session};

/// Output of the ACL stage.
#[derive(Debug)]
pub(crate) struct TranslatedAcl {
    /// The caller's own effective permission, already clamped to the folder
    /// type.
    pub own: Permission,
    /// Per-entity permissions in ACL enumeration order.
    pub permissions: Vec<Permission>,
}

impl TranslatedAcl {
    /// The synthesized fallback: a single-entry list holding only the
    /// caller's own rights.
    fn own_only(own: Permission) -> Self {
        let permissions = vec![own.clone()];
        Self { own, permissions }
    }
}

/// Translates the folder's ACL into the permission model.
///
/// Only a transport failure or an unexpected GETACL failure while the
/// caller holds ADMINISTER propagates; every other condition degrades to
/// the own-only synthesis.
pub(crate) async fn resolve<H: MailboxHandle, P: PrincipalResolver>(
    handle: &mut H,
    principals: &P,
    own_rights: &Rights,
    exists: bool,
    kind: FolderKind,
    session: &Session,
    config: &ServerConfig,
    registry: &CapabilityRegistry,
) -> mailscope_imap::Result<TranslatedAcl> {
    // ACL rights are hierarchy-wide, the type bits are folder-specific; the
    // more restrictive wins regardless of which path produces the list.
    let own = Permission::from_rights(own_rights, Some(session.user_id), false).clamped_to(kind);

    let AclSupport::Supported(variant) = config.acl else {
        return Ok(TranslatedAcl::own_only(own));
    };

    if !exists {
        return Ok(TranslatedAcl::own_only(own));
    }

    if !own_rights.can_administer() && registry.has_restrictive_acl(&config.identity) {
        debug!(
            folder = handle.full_name(),
            server = %config.identity,
            "skipping GETACL, server requires ADMINISTER rights"
        );
        return Ok(TranslatedAcl::own_only(own));
    }

    let line = match handle.get_acl().await {
        Ok(line) => line,
        Err(err) if err.is_transport() => return Err(err),
        Err(err) => {
            if own_rights.can_administer() {
                // Failing despite ADMINISTER is not a capability gap.
                return Err(err);
            }
            if err.requires_administer() {
                registry.note_restrictive_acl(&config.identity);
                debug!(
                    server = %config.identity,
                    "GETACL requires ADMINISTER on this server, remembering"
                );
            } else {
                warn!(folder = handle.full_name(), %err, "GETACL failed");
            }
            return Ok(TranslatedAcl::own_only(own));
        }
    };

    let entries = match parser::parse_acl_line(&line) {
        Ok((_, entries)) => entries,
        Err(err) => {
            warn!(folder = handle.full_name(), %err, "unparseable GETACL response");
            return Ok(TranslatedAcl::own_only(own));
        }
    };

    let args = EntityArgs::for_variant(variant, session, handle.full_name(), handle.separator());
    let mut permissions = Vec::with_capacity(entries.len());
    for entry in entries {
        match principals.resolve(&entry.identifier, &args).await {
            Ok(principal) => permissions.push(Permission::from_rights(
                &entry.rights,
                Some(principal.entity_id),
                principal.is_group,
            )),
            Err(PrincipalError::UnknownPrincipal(identifier)) => {
                debug!(%identifier, "dropping ACL entry for unknown principal");
            }
            Err(PrincipalError::Failure(reason)) => {
                warn!(
                    folder = handle.full_name(),
                    %reason,
                    "ACL translation failed, synthesizing own-only list"
                );
                return Ok(TranslatedAcl::own_only(own));
            }
        }
    }

    Ok(TranslatedAcl { own, permissions })
}
