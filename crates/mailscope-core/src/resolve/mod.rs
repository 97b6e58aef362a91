//! The resolution pipeline.
//!
//! Stages run in a fixed order: attributes, own rights, ACL translation,
//! namespace guard, then classification and counters. Each stage's failure
//! is caught locally and converted to the most conservative safe value for
//! that stage (empty rights, own-only permissions, no sub-folders, not a
//! default folder). The one exception is a transport-level failure, which is
//! fatal wherever it strikes: without a working connection no trustworthy
//! descriptor can be produced, and a cancelled or timed-out round trip
//! surfaces the same way. There are no retries anywhere in the pipeline.

mod acl;
mod attributes;
mod namespace;
mod rights;

use tracing::warn;

use crate::cache::{CapabilityRegistry, ConnectionCaches};
use crate::error::{Error, Result};
use crate::handle::MailboxHandle;
use crate::model::{FolderAccess, FolderDescriptor, Permission};
use crate::principal::PrincipalResolver;
use crate::session::{ServerConfig, Session};

use namespace::NamespaceDecision;

/// Resolves mailbox handles into [`FolderDescriptor`]s.
///
/// One resolver serves one connection: the caches it borrows live and die
/// with that connection, while the capability registry is shared across the
/// pool. Resolutions on the same connection must be serialized by the
/// caller; the handle's `&mut` receiver enforces that for a single handle.
pub struct FolderResolver<'a, P> {
    session: &'a Session,
    config: &'a ServerConfig,
    caches: &'a ConnectionCaches,
    registry: &'a CapabilityRegistry,
    principals: &'a P,
}

impl<'a, P: PrincipalResolver> FolderResolver<'a, P> {
    /// Creates a resolver for one connection.
    #[must_use]
    pub const fn new(
        session: &'a Session,
        config: &'a ServerConfig,
        caches: &'a ConnectionCaches,
        registry: &'a CapabilityRegistry,
        principals: &'a P,
    ) -> Self {
        Self {
            session,
            config,
            caches,
            registry,
            principals,
        }
    }

    /// Resolves one mailbox into a folder descriptor.
    ///
    /// Degraded metadata still yields a descriptor with conservative
    /// permissions and `-1` counters; omitting the folder from a listing
    /// would be the worse failure mode for an end user.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] on connection-level failure; all command-level
    /// refusals are recovered internally.
    pub async fn resolve<H: MailboxHandle>(&self, handle: &mut H) -> Result<FolderDescriptor> {
        let full_name = handle.full_name().to_string();
        let separator = handle.separator();

        // The root has no meaningful ACL and never touches the wire.
        if full_name.is_empty() {
            return Ok(root_descriptor(separator));
        }

        let kind = handle.kind();
        let subscriptions_honored =
            self.config.honor_subscriptions && self.session.subscriptions_enabled;

        // Basic attributes are the one mandatory input; failure here is
        // fatal either way, but a command refusal is not a broken
        // connection and is labeled separately.
        let listing_fatal = |err: mailscope_imap::Error| {
            if err.is_transport() {
                Error::Transport(err)
            } else {
                Error::Listing(err)
            }
        };
        let exists = handle.exists().await.map_err(listing_fatal)?;
        let attrs = attributes::resolve(handle, subscriptions_honored)
            .await
            .map_err(listing_fatal)?;
        let exists = exists && !attrs.non_existent;
        let has_subfolders = attrs.has_subfolders && kind.holds_folders();
        let has_subscribed_subfolders = attrs.has_subscribed_subfolders && has_subfolders;

        let own_rights = rights::resolve(handle, self.config, self.caches)
            .await
            .map_err(Error::Transport)?;

        let translated = acl::resolve(
            handle,
            self.principals,
            &own_rights,
            exists,
            kind,
            self.session,
            self.config,
            self.registry,
        )
        .await
        .map_err(|err| {
            if err.is_transport() {
                Error::Transport(err)
            } else {
                Error::AclRetrieval(err)
            }
        })?;
        let mut own = translated.own;
        let mut permissions = translated.permissions;

        match namespace::classify(handle, self.caches).await {
            Ok(NamespaceDecision::Bypass) => {}
            Ok(NamespaceDecision::DenyCreation) => {
                // Users must not create siblings of other users' hierarchies.
                own = Permission::empty(own.entity, own.is_group);
                permissions = vec![own.clone()];
            }
            Ok(NamespaceDecision::ImplicitCreation) => {
                if own.folder_access < FolderAccess::Create {
                    own.folder_access = FolderAccess::Create;
                }
                own.is_folder_admin = true;
            }
            Err(err) if err.is_transport() => return Err(Error::Transport(err)),
            Err(err) => {
                warn!(folder = %full_name, %err, "namespace lookup failed, denying creation");
                own = Permission::empty(own.entity, own.is_group);
                permissions = vec![own.clone()];
            }
        }

        let subscribed = if !subscriptions_honored {
            true
        } else if let Some(subscribed) = attrs.subscribed {
            subscribed
        } else {
            match handle.is_subscribed().await {
                Ok(subscribed) => subscribed,
                Err(err) if err.is_transport() => return Err(Error::Transport(err)),
                Err(err) => {
                    warn!(folder = %full_name, %err, "subscription state unavailable");
                    false
                }
            }
        };

        let counters = if exists && kind.holds_messages() && own_rights.can_read() {
            self.read_counters(handle, &full_name).await?
        } else {
            [FolderDescriptor::COUNT_UNAVAILABLE; 4]
        };

        let supports_custom_flags =
            if exists && kind.holds_messages() && own_rights.can_read() && self.session.user_flags_enabled {
                self.supports_user_flags(handle, &full_name).await?
            } else {
                false
            };

        let (default_folder, default_folder_checked) = if full_name.eq_ignore_ascii_case("INBOX") {
            (true, true)
        } else {
            match self.session.is_default_folder(&full_name) {
                Some(found) => (found, true),
                None => (false, false),
            }
        };

        Ok(FolderDescriptor {
            name: handle.name().to_string(),
            full_name,
            separator,
            exists,
            non_existent: attrs.non_existent,
            is_root: false,
            parent_full_name: handle.parent_full_name().map(ToString::to_string),
            has_subfolders,
            has_subscribed_subfolders,
            holds_messages: kind.holds_messages(),
            holds_folders: kind.holds_folders(),
            subscribed,
            message_count: counters[0],
            new_message_count: counters[1],
            unread_message_count: counters[2],
            deleted_message_count: counters[3],
            default_folder,
            default_folder_checked,
            supports_custom_flags,
            own_permission: Some(own),
            permissions,
        })
    }

    /// Reads the four message counters, uniformly degrading to the sentinel
    /// when the server refuses any of them.
    async fn read_counters<H: MailboxHandle>(
        &self,
        handle: &mut H,
        full_name: &str,
    ) -> Result<[i64; 4]> {
        let counts = async {
            Ok::<_, mailscope_imap::Error>([
                handle.message_count().await?,
                handle.new_message_count().await?,
                handle.unread_message_count().await?,
                handle.deleted_message_count().await?,
            ])
        }
        .await;

        match counts {
            Ok(counts) => Ok(counts.map(i64::from)),
            Err(err) if err.is_transport() => Err(Error::Transport(err)),
            Err(err) => {
                warn!(folder = %full_name, %err, "message counters unavailable");
                Ok([FolderDescriptor::COUNT_UNAVAILABLE; 4])
            }
        }
    }

    /// Checks user-flag support through the per-connection cache. The probe
    /// looks for the `\*` marker in the permanent flags.
    async fn supports_user_flags<H: MailboxHandle>(
        &self,
        handle: &mut H,
        full_name: &str,
    ) -> Result<bool> {
        if let Some(cached) = self.caches.user_flags(full_name) {
            return Ok(cached);
        }
        match handle.permanent_flags().await {
            Ok(flags) => {
                let supported = flags.iter().any(|flag| flag == "\\*");
                self.caches.store_user_flags(full_name, supported);
                Ok(supported)
            }
            Err(err) if err.is_transport() => Err(Error::Transport(err)),
            Err(err) => {
                warn!(folder = %full_name, %err, "permanent flags unavailable");
                Ok(false)
            }
        }
    }
}

/// The descriptor for the hierarchy root: always present, always a default
/// folder, no ACL of its own.
fn root_descriptor(separator: char) -> FolderDescriptor {
    FolderDescriptor {
        full_name: String::new(),
        name: String::new(),
        separator,
        exists: true,
        non_existent: false,
        is_root: true,
        parent_full_name: None,
        has_subfolders: true,
        has_subscribed_subfolders: true,
        holds_messages: false,
        holds_folders: true,
        subscribed: true,
        message_count: FolderDescriptor::COUNT_UNAVAILABLE,
        new_message_count: FolderDescriptor::COUNT_UNAVAILABLE,
        unread_message_count: FolderDescriptor::COUNT_UNAVAILABLE,
        deleted_message_count: FolderDescriptor::COUNT_UNAVAILABLE,
        default_folder: true,
        default_folder_checked: true,
        supports_custom_flags: false,
        own_permission: None,
        permissions: Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn root_descriptor_shape() {
        let root = root_descriptor('/');
        assert!(root.is_root);
        assert!(root.full_name.is_empty());
        assert!(root.default_folder);
        assert!(root.own_permission.is_none());
        assert_eq!(root.message_count, FolderDescriptor::COUNT_UNAVAILABLE);
    }
}
