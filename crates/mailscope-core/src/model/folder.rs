//! The resolved folder descriptor.

use serde::Serialize;

use super::Permission;

/// A fully resolved folder: the engine's single output value.
///
/// Built once at the end of the pipeline; there is no partially-constructed
/// state to observe. Invariants the pipeline maintains:
///
/// - `non_existent` implies `!exists`
/// - `!has_subfolders` implies `!has_subscribed_subfolders`
/// - the four counters are either all [`Self::COUNT_UNAVAILABLE`] or all
///   non-negative, never mixed
/// - `own_permission` is present except on the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderDescriptor {
    /// Full hierarchical name; empty for the root.
    pub full_name: String,
    /// Last hierarchy component.
    pub name: String,
    /// Hierarchy separator character.
    pub separator: char,
    /// Whether the mailbox exists on the server.
    pub exists: bool,
    /// Server reports the mailbox was deleted or renamed away but is still
    /// referenced (RFC 5258 \NonExistent).
    pub non_existent: bool,
    /// True for the hierarchy root.
    pub is_root: bool,
    /// Full name of the parent, absent for the root.
    pub parent_full_name: Option<String>,
    /// Whether the folder has sub-folders.
    pub has_subfolders: bool,
    /// Whether the folder has subscribed sub-folders.
    pub has_subscribed_subfolders: bool,
    /// Whether the folder may contain messages.
    pub holds_messages: bool,
    /// Whether the folder may contain sub-folders.
    pub holds_folders: bool,
    /// Whether the folder is subscribed.
    pub subscribed: bool,
    /// Total message count, [`Self::COUNT_UNAVAILABLE`] when not readable.
    pub message_count: i64,
    /// Recent message count, [`Self::COUNT_UNAVAILABLE`] when not readable.
    pub new_message_count: i64,
    /// Unseen message count, [`Self::COUNT_UNAVAILABLE`] when not readable.
    pub unread_message_count: i64,
    /// Deleted message count, [`Self::COUNT_UNAVAILABLE`] when not readable.
    pub deleted_message_count: i64,
    /// Whether the folder is one of the session's default folders. Only
    /// meaningful when `default_folder_checked` is true.
    pub default_folder: bool,
    /// True when default-folder classification was actually performed;
    /// distinguishes "known false" from "not evaluated".
    pub default_folder_checked: bool,
    /// Whether the mailbox accepts user-defined message flags.
    pub supports_custom_flags: bool,
    /// The current principal's effective permission; absent on the root.
    pub own_permission: Option<Permission>,
    /// Per-entity permissions in ACL enumeration order. Entity uniqueness is
    /// not guaranteed by the protocol and no de-duplication is performed.
    pub permissions: Vec<Permission>,
}

impl FolderDescriptor {
    /// Sentinel for counters that are not applicable or not permitted.
    pub const COUNT_UNAVAILABLE: i64 = -1;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> FolderDescriptor {
        FolderDescriptor {
            full_name: "INBOX/Work".to_string(),
            name: "Work".to_string(),
            separator: '/',
            exists: true,
            non_existent: false,
            is_root: false,
            parent_full_name: Some("INBOX".to_string()),
            has_subfolders: false,
            has_subscribed_subfolders: false,
            holds_messages: true,
            holds_folders: true,
            subscribed: true,
            message_count: 12,
            new_message_count: 0,
            unread_message_count: 3,
            deleted_message_count: 0,
            default_folder: false,
            default_folder_checked: true,
            supports_custom_flags: true,
            own_permission: Some(Permission::empty(Some(17), false)),
            permissions: vec![],
        }
    }

    #[test]
    fn serializes_for_the_folder_tree_layer() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["full_name"], "INBOX/Work");
        assert_eq!(json["message_count"], 12);
        assert_eq!(json["own_permission"]["folder_access"], "none");
    }

    #[test]
    fn count_sentinel_is_negative_one() {
        assert_eq!(FolderDescriptor::COUNT_UNAVAILABLE, -1);
    }
}
