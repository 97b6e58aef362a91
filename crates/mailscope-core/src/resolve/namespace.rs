//! Namespace-root detection.
//!
//! A folder that holds sub-mailboxes but no messages is ambiguous: an
//! ordinary container folder, where creating children is fine, or a
//! namespace root, where users must not create siblings of other users'
//! hierarchies. The advertised namespaces disambiguate.

use mailscope_imap::{parser, Namespaces};

use crate::cache::ConnectionCaches;
use crate::handle::MailboxHandle;

/// Outcome of the namespace guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NamespaceDecision {
    /// Ordinary folder; the guard does not apply.
    Bypass,
    /// The folder is a namespace root: sub-folder creation is denied and
    /// rights collapse to empty.
    DenyCreation,
    /// Ordinary container folder: implicit creation rights apply.
    ImplicitCreation,
}

/// Classifies a folder against the server's namespaces.
///
/// Only fires for the ambiguous holds-folders-but-not-messages case;
/// everything else bypasses. The namespace lists are fetched once per
/// connection and cached.
pub(crate) async fn classify<H: MailboxHandle>(
    handle: &mut H,
    caches: &ConnectionCaches,
) -> mailscope_imap::Result<NamespaceDecision> {
    let kind = handle.kind();
    if kind.holds_messages() || !kind.holds_folders() {
        return Ok(NamespaceDecision::Bypass);
    }

    let namespaces = match caches.namespaces() {
        Some(namespaces) => namespaces,
        None => {
            let line = handle.namespaces().await?;
            let namespaces = parser::parse_namespace_line(&line)?;
            caches.store_namespaces(namespaces.clone());
            namespaces
        }
    };

    if is_namespace_root(handle.full_name(), handle.separator(), &namespaces) {
        Ok(NamespaceDecision::DenyCreation)
    } else {
        Ok(NamespaceDecision::ImplicitCreation)
    }
}

/// Case-sensitive match of a full name against the namespace roots.
///
/// The other-users namespace is itself nested (`Other Users/jan/...`), so
/// one level of its children counts as a root as well.
fn is_namespace_root(full_name: &str, separator: char, namespaces: &Namespaces) -> bool {
    let matches_root = |root: &str| !root.is_empty() && root == full_name;

    if namespaces
        .personal
        .iter()
        .chain(namespaces.shared.iter())
        .any(|entry| matches_root(entry.root_name()))
    {
        return true;
    }

    for entry in &namespaces.other_users {
        let root = entry.root_name();
        if root.is_empty() {
            continue;
        }
        if root == full_name {
            return true;
        }
        let delimiter = entry.delimiter.unwrap_or(separator);
        if let Some(child) = full_name
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix(delimiter))
        {
            if !child.is_empty() && !child.contains(delimiter) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mailscope_imap::NamespaceEntry;

    fn namespaces() -> Namespaces {
        Namespaces {
            personal: vec![NamespaceEntry::new("INBOX/", Some('/'))],
            other_users: vec![NamespaceEntry::new("Other Users/", Some('/'))],
            shared: vec![NamespaceEntry::new("Shared/", Some('/'))],
        }
    }

    #[test]
    fn exact_personal_root_matches() {
        assert!(is_namespace_root("INBOX", '/', &namespaces()));
        assert!(is_namespace_root("Shared", '/', &namespaces()));
    }

    #[test]
    fn other_users_root_and_children_match() {
        let ns = namespaces();
        assert!(is_namespace_root("Other Users", '/', &ns));
        assert!(is_namespace_root("Other Users/jan", '/', &ns));
        assert!(!is_namespace_root("Other Users/jan/Sent", '/', &ns));
    }

    #[test]
    fn ordinary_folders_do_not_match() {
        let ns = namespaces();
        assert!(!is_namespace_root("Projects", '/', &ns));
        assert!(!is_namespace_root("INBOX/Work", '/', &ns));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!is_namespace_root("other users", '/', &namespaces()));
    }

    #[test]
    fn empty_personal_prefix_never_matches() {
        let ns = Namespaces {
            personal: vec![NamespaceEntry::new("", Some('/'))],
            ..Namespaces::default()
        };
        assert!(!is_namespace_root("", '/', &ns));
        assert!(!is_namespace_root("INBOX", '/', &ns));
    }
}
