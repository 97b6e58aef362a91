//! Namespaces (RFC 2342).

/// A single namespace: prefix plus hierarchy delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    /// Namespace prefix, usually ending in the delimiter (`"Other Users/"`).
    pub prefix: String,
    /// Hierarchy delimiter, `None` when the server reported NIL.
    pub delimiter: Option<char>,
}

impl NamespaceEntry {
    /// Creates a new namespace entry.
    #[must_use]
    pub fn new(prefix: impl Into<String>, delimiter: Option<char>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter,
        }
    }

    /// Returns the root mailbox name of this namespace: the prefix with a
    /// trailing delimiter removed (`"Other Users/"` → `"Other Users"`).
    #[must_use]
    pub fn root_name(&self) -> &str {
        match self.delimiter {
            Some(delimiter) => self.prefix.strip_suffix(delimiter).unwrap_or(&self.prefix),
            None => &self.prefix,
        }
    }
}

/// The three namespace classes a server may advertise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    /// Namespaces holding the user's own mailboxes.
    pub personal: Vec<NamespaceEntry>,
    /// Namespaces holding other users' mailboxes.
    pub other_users: Vec<NamespaceEntry>,
    /// Shared namespaces.
    pub shared: Vec<NamespaceEntry>,
}

impl Namespaces {
    /// Returns an iterator over every namespace entry, personal first.
    pub fn iter(&self) -> impl Iterator<Item = &NamespaceEntry> {
        self.personal
            .iter()
            .chain(self.other_users.iter())
            .chain(self.shared.iter())
    }

    /// Returns true if no namespace was advertised at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.personal.is_empty() && self.other_users.is_empty() && self.shared.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn root_name_strips_trailing_delimiter() {
        let ns = NamespaceEntry::new("Other Users/", Some('/'));
        assert_eq!(ns.root_name(), "Other Users");

        let ns = NamespaceEntry::new("INBOX.", Some('.'));
        assert_eq!(ns.root_name(), "INBOX");
    }

    #[test]
    fn root_name_without_delimiter() {
        let ns = NamespaceEntry::new("Shared", None);
        assert_eq!(ns.root_name(), "Shared");
    }

    #[test]
    fn iter_covers_all_classes() {
        let namespaces = Namespaces {
            personal: vec![NamespaceEntry::new("", Some('/'))],
            other_users: vec![NamespaceEntry::new("Other Users/", Some('/'))],
            shared: vec![NamespaceEntry::new("Shared/", Some('/'))],
        };
        assert_eq!(namespaces.iter().count(), 3);
        assert!(!namespaces.is_empty());
        assert!(Namespaces::default().is_empty());
    }
}
