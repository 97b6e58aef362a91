//! Mailbox names, LIST attributes, and LIST/LSUB entries.

/// Mailbox name.
///
/// The empty name denotes the hierarchy root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailboxName(pub String);

impl MailboxName {
    /// Creates a new mailbox name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The INBOX mailbox (case-insensitive per RFC 3501).
    #[must_use]
    pub fn inbox() -> Self {
        Self("INBOX".to_string())
    }

    /// Returns the mailbox name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the hierarchy root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this names the INBOX.
    #[must_use]
    pub fn is_inbox(&self) -> bool {
        self.0.eq_ignore_ascii_case("INBOX")
    }

    /// Returns the last hierarchy component of the name.
    #[must_use]
    pub fn leaf(&self, separator: char) -> &str {
        self.0
            .rsplit_once(separator)
            .map_or(self.0.as_str(), |(_, leaf)| leaf)
    }

    /// Returns the full name of the parent mailbox, or `None` for top-level
    /// mailboxes and the root itself.
    #[must_use]
    pub fn parent(&self, separator: char) -> Option<&str> {
        self.0.rsplit_once(separator).map(|(parent, _)| parent)
    }
}

impl std::fmt::Display for MailboxName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mailbox attributes from LIST/LSUB responses (RFC 3501, RFC 5258).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MailboxAttribute {
    /// Mailbox cannot be selected.
    NoSelect,
    /// Mailbox cannot have children.
    NoInferiors,
    /// Mailbox has children.
    HasChildren,
    /// Mailbox has no children.
    HasNoChildren,
    /// Mailbox is marked for attention.
    Marked,
    /// Mailbox is not marked.
    Unmarked,
    /// Mailbox is subscribed (RFC 5258).
    Subscribed,
    /// Mailbox no longer exists but is still subscribed or has subscribed
    /// children (RFC 5258).
    NonExistent,
    /// Unknown attribute.
    Unknown(String),
}

impl MailboxAttribute {
    /// Parses a mailbox attribute string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "\\NOSELECT" => Self::NoSelect,
            "\\NOINFERIORS" => Self::NoInferiors,
            "\\HASCHILDREN" => Self::HasChildren,
            "\\HASNOCHILDREN" => Self::HasNoChildren,
            "\\MARKED" => Self::Marked,
            "\\UNMARKED" => Self::Unmarked,
            "\\SUBSCRIBED" => Self::Subscribed,
            "\\NONEXISTENT" => Self::NonExistent,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

/// One entry of a LIST or LSUB response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Mailbox attributes.
    pub attributes: Vec<MailboxAttribute>,
    /// Hierarchy delimiter, `None` when the server reported NIL.
    pub delimiter: Option<char>,
    /// Mailbox name.
    pub name: MailboxName,
}

impl ListEntry {
    /// Returns true if the entry carries the given attribute.
    #[must_use]
    pub fn has_attribute(&self, attribute: &MailboxAttribute) -> bool {
        self.attributes.contains(attribute)
    }
}
