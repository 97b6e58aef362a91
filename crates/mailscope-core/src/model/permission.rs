//! The internal permission model.
//!
//! Wire-level rights letters are a flat bitset; the folder tree wants a
//! small ordinal per axis. The projection lives here and nowhere else.

use mailscope_imap::{Right, Rights};
use serde::Serialize;

use crate::handle::FolderKind;

/// What the entity may do with the folder itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderAccess {
    /// Folder is invisible.
    #[default]
    None,
    /// Folder is visible.
    Read,
    /// May create sub-folders.
    Create,
    /// Full administration, including ACL changes.
    Admin,
}

/// What the entity may do with objects in the folder, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectAccess {
    /// No access.
    #[default]
    None,
    /// Own objects only.
    Own,
    /// All objects.
    All,
}

/// One entity's effective permission on a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    /// Internal entity identifier; absent when the ACL identifier could not
    /// be mapped.
    pub entity: Option<u32>,
    /// True when the entity is a group.
    pub is_group: bool,
    /// True when the entity administers the folder's ACL.
    pub is_folder_admin: bool,
    /// Folder-level access.
    pub folder_access: FolderAccess,
    /// Read access to contained objects.
    pub read_access: ObjectAccess,
    /// Write access to contained objects.
    pub write_access: ObjectAccess,
    /// Delete access to contained objects.
    pub delete_access: ObjectAccess,
}

impl Permission {
    /// A permission granting nothing.
    #[must_use]
    pub const fn empty(entity: Option<u32>, is_group: bool) -> Self {
        Self {
            entity,
            is_group,
            is_folder_admin: false,
            folder_access: FolderAccess::None,
            read_access: ObjectAccess::None,
            write_access: ObjectAccess::None,
            delete_access: ObjectAccess::None,
        }
    }

    /// Projects a wire-level rights set into the permission model.
    ///
    /// Per axis, the most permissive level the letters justify:
    /// `a` → admin, `c` → create, `l` → visible for the folder axis;
    /// `r`, `w`, `d` → all-objects on the read/write/delete axes. IMAP has
    /// no own-objects granularity, so [`ObjectAccess::Own`] never results
    /// from a projection; it exists for callers merging external grants.
    #[must_use]
    pub fn from_rights(rights: &Rights, entity: Option<u32>, is_group: bool) -> Self {
        let folder_access = if rights.contains(Right::Administer) {
            FolderAccess::Admin
        } else if rights.contains(Right::Create) {
            FolderAccess::Create
        } else if rights.contains(Right::Lookup) {
            FolderAccess::Read
        } else {
            FolderAccess::None
        };

        let object_access = |granted: bool| {
            if granted {
                ObjectAccess::All
            } else {
                ObjectAccess::None
            }
        };

        Self {
            entity,
            is_group,
            is_folder_admin: rights.contains(Right::Administer),
            folder_access,
            read_access: object_access(rights.contains(Right::Read)),
            write_access: object_access(rights.contains(Right::Write)),
            delete_access: object_access(rights.contains(Right::Delete)),
        }
    }

    /// Clamps the permission to what the folder type actually allows.
    ///
    /// ACL rights are a hierarchy-wide grant while the type bits are
    /// folder-specific; the more restrictive of the two wins. A folder that
    /// cannot hold sub-mailboxes loses sub-folder creation, a folder that
    /// cannot hold messages loses object reading.
    #[must_use]
    pub fn clamped_to(mut self, kind: FolderKind) -> Self {
        if !kind.holds_folders() && self.folder_access > FolderAccess::Read {
            self.folder_access = FolderAccess::Read;
        }
        if !kind.holds_messages() {
            self.read_access = ObjectAccess::None;
        }
        self
    }
}
