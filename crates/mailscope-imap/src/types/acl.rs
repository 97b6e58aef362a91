//! ACL entries.

use super::Rights;

/// A single ACL entry: one principal and the rights granted to it.
///
/// The protocol does not guarantee identifier uniqueness across a GETACL
/// response; entries are kept in server enumeration order and duplicates are
/// not collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclEntry {
    /// Principal identifier as the server reports it (login name, group
    /// name, or `anyone`).
    pub identifier: String,
    /// Rights granted to the principal.
    pub rights: Rights,
}

impl AclEntry {
    /// Creates a new ACL entry.
    #[must_use]
    pub fn new(identifier: impl Into<String>, rights: Rights) -> Self {
        Self {
            identifier: identifier.into(),
            rights,
        }
    }
}

impl std::fmt::Display for AclEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.identifier, self.rights)
    }
}
