//! Access rights.
//!
//! Rights strings as defined by RFC 2086 and extended by RFC 4314. Servers
//! answer MYRIGHTS and GETACL with a string of single-letter rights; this
//! module turns those letters into a typed set.

/// A single access right on a mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Right {
    /// Mailbox is visible to LIST/LSUB (`l`).
    Lookup,
    /// SELECT the mailbox and read messages (`r`).
    Read,
    /// Keep the \Seen flag across sessions (`s`).
    Seen,
    /// Set or clear message flags other than \Seen and \Deleted (`w`).
    Write,
    /// APPEND and COPY into the mailbox (`i`).
    Insert,
    /// Send mail to the submission address for the mailbox (`p`).
    Post,
    /// Create sub-mailboxes (`c`, RFC 4314 `k`).
    Create,
    /// Delete messages or the mailbox itself (`d`, RFC 4314 `t` and `x`).
    Delete,
    /// EXPUNGE deleted messages (RFC 4314 `e`).
    Expunge,
    /// Administer the mailbox: SETACL/GETACL/DELETEACL (`a`).
    Administer,
}

impl Right {
    /// Parses a single rights letter.
    ///
    /// RFC 4314 aliases collapse into their RFC 2086 counterparts: `k` is
    /// treated as [`Right::Create`], `t` and `x` as [`Right::Delete`].
    /// Returns `None` for letters we do not track (such as obsolete `0`-`9`).
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'l' => Some(Self::Lookup),
            'r' => Some(Self::Read),
            's' => Some(Self::Seen),
            'w' => Some(Self::Write),
            'i' => Some(Self::Insert),
            'p' => Some(Self::Post),
            'c' | 'k' => Some(Self::Create),
            'd' | 't' | 'x' => Some(Self::Delete),
            'e' => Some(Self::Expunge),
            'a' => Some(Self::Administer),
            _ => None,
        }
    }

    /// Returns the canonical rights letter.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Lookup => 'l',
            Self::Read => 'r',
            Self::Seen => 's',
            Self::Write => 'w',
            Self::Insert => 'i',
            Self::Post => 'p',
            Self::Create => 'c',
            Self::Delete => 'd',
            Self::Expunge => 'e',
            Self::Administer => 'a',
        }
    }
}

/// Canonical ordering used by [`Rights::to_string`].
const ALL_RIGHTS: [Right; 10] = [
    Right::Lookup,
    Right::Read,
    Right::Seen,
    Right::Write,
    Right::Insert,
    Right::Post,
    Right::Create,
    Right::Delete,
    Right::Expunge,
    Right::Administer,
];

/// A set of access rights on a mailbox.
///
/// This is the raw wire-level bitset. The engine projects it into its
/// internal permission model; nothing else should interpret the letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rights {
    rights: Vec<Right>,
}

impl Rights {
    /// Creates an empty rights set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rights: Vec::new() }
    }

    /// Creates a rights set granting everything.
    ///
    /// Servers without ACL support grant everything implicitly; this is the
    /// sentinel value for that case.
    #[must_use]
    pub fn full() -> Self {
        Self {
            rights: ALL_RIGHTS.to_vec(),
        }
    }

    /// Parses a rights string as returned by MYRIGHTS or GETACL.
    ///
    /// Unknown letters are ignored; the old `d` right also implies
    /// [`Right::Expunge`] per RFC 4314 section 2.1.1.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut rights = Self::empty();
        for letter in s.chars() {
            if let Some(right) = Right::from_letter(letter) {
                rights.insert(right);
            }
            if letter == 'd' {
                rights.insert(Right::Expunge);
            }
        }
        rights
    }

    /// Adds a right.
    pub fn insert(&mut self, right: Right) {
        if !self.rights.contains(&right) {
            self.rights.push(right);
        }
    }

    /// Returns true if the right is present.
    #[must_use]
    pub fn contains(&self, right: Right) -> bool {
        self.rights.contains(&right)
    }

    /// Returns true if the set grants READ.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.contains(Right::Read)
    }

    /// Returns true if the set grants ADMINISTER.
    #[must_use]
    pub fn can_administer(&self) -> bool {
        self.contains(Right::Administer)
    }

    /// Returns true if the set grants CREATE.
    #[must_use]
    pub fn can_create(&self) -> bool {
        self.contains(Right::Create)
    }

    /// Returns true if no rights are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rights.is_empty()
    }

    /// Returns an iterator over the rights.
    pub fn iter(&self) -> impl Iterator<Item = Right> + '_ {
        self.rights.iter().copied()
    }
}

impl std::fmt::Display for Rights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for right in ALL_RIGHTS {
            if self.contains(right) {
                write!(f, "{}", right.letter())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_classic_string() {
        let rights = Rights::parse("lrswipcda");
        assert!(rights.can_read());
        assert!(rights.can_administer());
        assert!(rights.can_create());
        assert!(rights.contains(Right::Expunge));
    }

    #[test]
    fn parse_rfc4314_aliases() {
        let rights = Rights::parse("kxte");
        assert!(rights.contains(Right::Create));
        assert!(rights.contains(Right::Delete));
        assert!(rights.contains(Right::Expunge));
        assert!(!rights.can_read());
    }

    #[test]
    fn parse_ignores_unknown_letters() {
        let rights = Rights::parse("lr01z");
        assert!(rights.contains(Right::Lookup));
        assert!(rights.can_read());
        assert_eq!(rights.iter().count(), 2);
    }

    #[test]
    fn display_uses_canonical_order() {
        let rights = Rights::parse("arl");
        assert_eq!(rights.to_string(), "lra");
    }

    #[test]
    fn full_grants_everything() {
        let rights = Rights::full();
        for right in super::ALL_RIGHTS {
            assert!(rights.contains(right));
        }
    }

    #[test]
    fn empty_grants_nothing() {
        let rights = Rights::empty();
        assert!(rights.is_empty());
        assert!(!rights.can_read());
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = Rights::parse(&s);
        }

        #[test]
        fn display_roundtrips(s in "[lrswipcdea]{0,10}") {
            let rights = Rights::parse(&s);
            let reparsed = Rights::parse(&rights.to_string());
            prop_assert_eq!(rights, reparsed);
        }
    }
}
