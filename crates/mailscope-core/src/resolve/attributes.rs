//! Folder attribute resolution.
//!
//! Extended LIST attributes answer most hierarchy questions directly. When
//! the client library has none for a mailbox, the engine issues raw LIST and
//! LSUB commands itself and derives the answers from the listing. The
//! fallback fires at most once per folder resolution and its result is
//! authoritative for that resolution; it is not cached across calls.

use mailscope_imap::{parser, ListEntry, MailboxAttribute};
use tracing::debug;

use crate::handle::MailboxHandle;

/// What the attribute stage hands to the rest of the pipeline.
#[derive(Debug)]
pub(crate) struct ResolvedAttributes {
    /// Raw LIST attributes; empty when the fallback listing was used.
    pub attributes: Vec<MailboxAttribute>,
    /// Whether the folder has sub-folders.
    pub has_subfolders: bool,
    /// Whether the folder has subscribed sub-folders.
    pub has_subscribed_subfolders: bool,
    /// Server marked the mailbox \NonExistent.
    pub non_existent: bool,
    /// Subscription state derived by the fallback listing; `None` when the
    /// normal attribute path was taken and the handle should be asked.
    pub subscribed: Option<bool>,
}

/// Resolves hierarchy attributes for a mailbox.
///
/// `subscriptions_honored` gates the extra LSUB round trip for subscribed
/// children; when subscriptions are not honored every child counts as
/// subscribed.
pub(crate) async fn resolve<H: MailboxHandle>(
    handle: &mut H,
    subscriptions_honored: bool,
) -> mailscope_imap::Result<ResolvedAttributes> {
    let full_name = handle.full_name().to_string();
    let separator = handle.separator();
    let child_pattern = format!("{full_name}{separator}%");

    if let Some(attributes) = handle.attributes().await? {
        let non_existent = attributes.contains(&MailboxAttribute::NonExistent);

        // Absent marker: the type bit or an explicit \HasNoChildren settles
        // it as false without another round trip; an unknown collapses to
        // false as well.
        let has_subfolders = attributes.contains(&MailboxAttribute::HasChildren);

        let has_subscribed_subfolders = if !has_subfolders {
            false
        } else if subscriptions_honored {
            !parse_listing(&handle.lsub("", &child_pattern).await?).is_empty()
        } else {
            true
        };

        return Ok(ResolvedAttributes {
            attributes,
            has_subfolders,
            has_subscribed_subfolders,
            non_existent,
            subscribed: None,
        });
    }

    debug!(
        folder = %full_name,
        "extended LIST attributes unavailable, falling back to manual listing"
    );

    let has_subfolders = !parse_listing(&handle.list("", &child_pattern).await?).is_empty();
    let has_subscribed_subfolders = if has_subfolders && subscriptions_honored {
        !parse_listing(&handle.lsub("", &child_pattern).await?).is_empty()
    } else {
        has_subfolders
    };

    // Subscription state of the folder itself. Wildcard characters in the
    // name can make the listing expand to near-matches; when no entry
    // matches the exact name, the first returned entry is taken rather than
    // failing. Preserved server-quirk behavior; do not tighten.
    let lsub_entries = parse_listing(&handle.lsub("", &full_name).await?);
    let own_entry = lsub_entries
        .iter()
        .find(|entry| entry.name.as_str() == full_name)
        .or_else(|| lsub_entries.first());
    let subscribed = Some(own_entry.is_some());

    Ok(ResolvedAttributes {
        attributes: Vec::new(),
        has_subfolders,
        has_subscribed_subfolders,
        non_existent: false,
        subscribed,
    })
}

/// Parses raw LIST/LSUB response lines. A line that cannot be parsed
/// degrades that line only, never the listing.
fn parse_listing(lines: &[String]) -> Vec<ListEntry> {
    lines
        .iter()
        .filter_map(|line| match parser::parse_list_line(line) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(%err, %line, "skipping unparseable listing line");
                None
            }
        })
        .collect()
}
