//! Lenient parsers for raw IMAP response lines.
//!
//! The folder engine's transport executes `LIST`/`LSUB`, `GETACL`,
//! `MYRIGHTS`, and `NAMESPACE` as raw commands and hands back the untagged
//! response lines unchanged; these parsers turn those lines into typed
//! values. Parsing here is deliberately forgiving: real servers
//! disagree on quoting and whitespace, and a line we cannot make sense of
//! should degrade the single folder, not kill the listing.

use crate::error::{Error, Result};
use crate::types::{
    AclEntry, ListEntry, MailboxAttribute, MailboxName, NamespaceEntry, Namespaces, Rights,
};

/// Character-level cursor over a response line.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.trim_end_matches(['\r', '\n']),
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            position: self.pos,
            message: message.into(),
        }
    }

    /// Consumes an expected literal, case-insensitively.
    fn expect(&mut self, literal: &str) -> Result<()> {
        if self
            .rest()
            .get(..literal.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(literal))
        {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(self.error(format!("expected `{literal}`")))
        }
    }

    /// Reads an atom: characters up to whitespace or a closing paren.
    fn read_atom(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ' ' || c == ')' || c == '(' {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    /// Reads a quoted string with backslash escapes.
    fn read_quoted(&mut self) -> Result<String> {
        if self.bump() != Some('"') {
            return Err(self.error("expected opening quote"));
        }
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err(self.error("dangling escape in quoted string")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated quoted string")),
            }
        }
    }

    /// Reads a mailbox name: quoted, or the remainder of the line.
    ///
    /// Unquoted names run to the end of the line because some servers emit
    /// names containing spaces without quoting them.
    fn read_name(&mut self) -> Result<String> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            self.read_quoted()
        } else if self.at_end() {
            Err(self.error("expected mailbox name"))
        } else {
            let rest = self.rest().to_string();
            self.pos = self.input.len();
            Ok(rest)
        }
    }

    /// Reads a delimiter field: NIL or a quoted (usually single) character.
    fn read_delimiter(&mut self) -> Result<Option<char>> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            let quoted = self.read_quoted()?;
            Ok(quoted.chars().next())
        } else {
            let atom = self.read_atom();
            if atom.eq_ignore_ascii_case("NIL") {
                Ok(None)
            } else {
                Ok(atom.chars().next())
            }
        }
    }
}

/// Parses an untagged `LIST` or `LSUB` response line.
///
/// Accepts both `* LIST (\HasChildren) "/" INBOX` and the LSUB spelling.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the line is not a LIST/LSUB response or a
/// mandatory field is missing.
pub fn parse_list_line(line: &str) -> Result<ListEntry> {
    let mut cursor = Cursor::new(line);
    cursor.expect("*")?;
    cursor.skip_whitespace();

    let verb = cursor.read_atom();
    if !verb.eq_ignore_ascii_case("LIST") && !verb.eq_ignore_ascii_case("LSUB") {
        return Err(cursor.error(format!("expected LIST or LSUB, got `{verb}`")));
    }
    cursor.skip_whitespace();

    cursor.expect("(")?;
    let mut attributes = Vec::new();
    loop {
        cursor.skip_whitespace();
        if cursor.peek() == Some(')') {
            cursor.bump();
            break;
        }
        let atom = cursor.read_atom();
        if atom.is_empty() {
            return Err(cursor.error("unterminated attribute list"));
        }
        attributes.push(MailboxAttribute::parse(atom));
    }

    let delimiter = cursor.read_delimiter()?;
    let name = cursor.read_name()?;

    Ok(ListEntry {
        attributes,
        delimiter,
        name: MailboxName::new(name),
    })
}

/// Parses an untagged `ACL` response line: mailbox followed by
/// identifier/rights pairs.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the line is not an ACL response or a rights
/// string is missing for an identifier.
pub fn parse_acl_line(line: &str) -> Result<(MailboxName, Vec<AclEntry>)> {
    let mut cursor = Cursor::new(line);
    cursor.expect("*")?;
    cursor.skip_whitespace();
    cursor.expect("ACL")?;
    cursor.skip_whitespace();

    let mailbox = if cursor.peek() == Some('"') {
        cursor.read_quoted()?
    } else {
        cursor.read_atom().to_string()
    };
    if mailbox.is_empty() {
        return Err(cursor.error("expected mailbox name"));
    }

    let mut entries = Vec::new();
    loop {
        cursor.skip_whitespace();
        if cursor.at_end() {
            break;
        }
        let identifier = if cursor.peek() == Some('"') {
            cursor.read_quoted()?
        } else {
            cursor.read_atom().to_string()
        };
        cursor.skip_whitespace();
        let rights = cursor.read_atom();
        if rights.is_empty() {
            return Err(cursor.error(format!("missing rights for identifier `{identifier}`")));
        }
        entries.push(AclEntry::new(identifier, Rights::parse(rights)));
    }

    Ok((MailboxName::new(mailbox), entries))
}

/// Parses an untagged `MYRIGHTS` response line.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the line is not a MYRIGHTS response.
pub fn parse_myrights_line(line: &str) -> Result<(MailboxName, Rights)> {
    let mut cursor = Cursor::new(line);
    cursor.expect("*")?;
    cursor.skip_whitespace();
    cursor.expect("MYRIGHTS")?;
    cursor.skip_whitespace();

    let mailbox = if cursor.peek() == Some('"') {
        cursor.read_quoted()?
    } else {
        cursor.read_atom().to_string()
    };
    cursor.skip_whitespace();
    let rights = cursor.read_atom();
    if rights.is_empty() {
        return Err(cursor.error("missing rights string"));
    }

    Ok((MailboxName::new(mailbox), Rights::parse(rights)))
}

/// Parses an untagged `NAMESPACE` response line (RFC 2342).
///
/// Extension data inside a namespace pair is skipped.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the line is not a NAMESPACE response or a
/// namespace list is malformed.
pub fn parse_namespace_line(line: &str) -> Result<Namespaces> {
    let mut cursor = Cursor::new(line);
    cursor.expect("*")?;
    cursor.skip_whitespace();
    cursor.expect("NAMESPACE")?;

    let personal = read_namespace_list(&mut cursor)?;
    let other_users = read_namespace_list(&mut cursor)?;
    let shared = read_namespace_list(&mut cursor)?;

    Ok(Namespaces {
        personal,
        other_users,
        shared,
    })
}

/// Reads one namespace class: NIL or `(("prefix" "delim") ...)`.
fn read_namespace_list(cursor: &mut Cursor<'_>) -> Result<Vec<NamespaceEntry>> {
    cursor.skip_whitespace();
    if cursor.peek() != Some('(') {
        let atom = cursor.read_atom();
        if atom.eq_ignore_ascii_case("NIL") {
            return Ok(Vec::new());
        }
        return Err(cursor.error("expected namespace list or NIL"));
    }
    cursor.bump();

    let mut entries = Vec::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(')') => {
                cursor.bump();
                return Ok(entries);
            }
            Some('(') => {
                cursor.bump();
                cursor.skip_whitespace();
                let prefix = cursor.read_quoted()?;
                let delimiter = cursor.read_delimiter()?;
                // Skip any extension data up to the closing paren.
                let mut depth = 0usize;
                loop {
                    match cursor.bump() {
                        Some('(') => depth += 1,
                        Some(')') if depth == 0 => break,
                        Some(')') => depth -= 1,
                        Some(_) => {}
                        None => return Err(cursor.error("unterminated namespace pair")),
                    }
                }
                entries.push(NamespaceEntry::new(prefix, delimiter));
            }
            _ => return Err(cursor.error("unterminated namespace list")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn list_with_attributes_and_quoted_name() {
        let entry =
            parse_list_line("* LIST (\\HasChildren \\Marked) \"/\" \"Other Users\"\r\n").unwrap();
        assert_eq!(entry.attributes.len(), 2);
        assert!(entry.has_attribute(&MailboxAttribute::HasChildren));
        assert_eq!(entry.delimiter, Some('/'));
        assert_eq!(entry.name.as_str(), "Other Users");
    }

    #[test]
    fn list_with_unquoted_name_containing_spaces() {
        let entry = parse_list_line("* LIST () \".\" Project Reports").unwrap();
        assert!(entry.attributes.is_empty());
        assert_eq!(entry.delimiter, Some('.'));
        assert_eq!(entry.name.as_str(), "Project Reports");
    }

    #[test]
    fn list_with_nil_delimiter() {
        let entry = parse_list_line("* LIST (\\NoInferiors) NIL INBOX").unwrap();
        assert_eq!(entry.delimiter, None);
        assert_eq!(entry.name.as_str(), "INBOX");
    }

    #[test]
    fn list_with_escaped_backslash_delimiter() {
        let entry = parse_list_line("* LIST () \"\\\\\" Archive").unwrap();
        assert_eq!(entry.delimiter, Some('\\'));
    }

    #[test]
    fn lsub_is_accepted() {
        let entry = parse_list_line("* LSUB () \"/\" INBOX/Sent").unwrap();
        assert_eq!(entry.name.as_str(), "INBOX/Sent");
    }

    #[test]
    fn non_list_line_is_rejected() {
        assert!(parse_list_line("* STATUS INBOX (MESSAGES 3)").is_err());
        assert!(parse_list_line("A001 OK done").is_err());
    }

    #[test]
    fn acl_with_two_identifiers() {
        let (mailbox, entries) = parse_acl_line("* ACL INBOX fred lrswipcda joe lrs").unwrap();
        assert_eq!(mailbox.as_str(), "INBOX");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].identifier, "fred");
        assert!(entries[0].rights.can_administer());
        assert_eq!(entries[1].identifier, "joe");
        assert!(!entries[1].rights.can_administer());
    }

    #[test]
    fn acl_preserves_enumeration_order() {
        let (_, entries) = parse_acl_line("* ACL X anyone l fred lr anyone r").unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, ["anyone", "fred", "anyone"]);
    }

    #[test]
    fn acl_with_quoted_mailbox() {
        let (mailbox, entries) = parse_acl_line("* ACL \"Other Users/jan\" jan lrswipcda").unwrap();
        assert_eq!(mailbox.as_str(), "Other Users/jan");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn acl_missing_rights_is_rejected() {
        assert!(parse_acl_line("* ACL INBOX fred").is_err());
    }

    #[test]
    fn myrights_line() {
        let (mailbox, rights) = parse_myrights_line("* MYRIGHTS INBOX lrswipcd").unwrap();
        assert_eq!(mailbox.as_str(), "INBOX");
        assert!(rights.can_read());
        assert!(!rights.can_administer());
    }

    #[test]
    fn namespace_full_response() {
        let namespaces = parse_namespace_line(
            "* NAMESPACE ((\"\" \"/\")) ((\"Other Users/\" \"/\")) ((\"Shared/\" \"/\"))",
        )
        .unwrap();
        assert_eq!(namespaces.personal.len(), 1);
        assert_eq!(namespaces.other_users.len(), 1);
        assert_eq!(namespaces.other_users[0].root_name(), "Other Users");
        assert_eq!(namespaces.shared.len(), 1);
    }

    #[test]
    fn namespace_with_nil_classes() {
        let namespaces = parse_namespace_line("* NAMESPACE ((\"\" \"/\")) NIL NIL").unwrap();
        assert_eq!(namespaces.personal.len(), 1);
        assert!(namespaces.other_users.is_empty());
        assert!(namespaces.shared.is_empty());
    }

    #[test]
    fn namespace_with_extension_data() {
        let namespaces = parse_namespace_line(
            "* NAMESPACE ((\"\" \"/\" \"X-PARAM\" (\"FLAG1\" \"FLAG2\"))) NIL NIL",
        )
        .unwrap();
        assert_eq!(namespaces.personal.len(), 1);
        assert_eq!(namespaces.personal[0].prefix, "");
        assert_eq!(namespaces.personal[0].delimiter, Some('/'));
    }

    #[test]
    fn namespace_multiple_entries_in_one_class() {
        let namespaces =
            parse_namespace_line("* NAMESPACE ((\"\" \"/\") (\"#mh/\" \"/\")) NIL NIL").unwrap();
        assert_eq!(namespaces.personal.len(), 2);
        assert_eq!(namespaces.personal[1].prefix, "#mh/");
    }
}
