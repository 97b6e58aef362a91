//! Effective own-rights resolution.
//!
//! MYRIGHTS answers what the current principal may do with a mailbox.
//! Failures here never abort a folder resolution: a refused MYRIGHTS means
//! empty rights, and only a genuine transport failure propagates. Results
//! are memoized per connection.

use mailscope_imap::{parser, Rights};
use tracing::{debug, warn};

use crate::cache::ConnectionCaches;
use crate::handle::MailboxHandle;
use crate::session::{AclSupport, ServerConfig};

/// Resolves the current principal's effective rights on a mailbox.
///
/// Servers without ACL support grant everything implicitly (legacy
/// behavior), so the full-rights sentinel is returned without a round trip.
pub(crate) async fn resolve<H: MailboxHandle>(
    handle: &mut H,
    config: &ServerConfig,
    caches: &ConnectionCaches,
) -> mailscope_imap::Result<Rights> {
    if config.acl == AclSupport::Unsupported {
        return Ok(Rights::full());
    }

    let full_name = handle.full_name().to_string();
    if let Some(rights) = caches.rights(&full_name) {
        return Ok(rights);
    }

    match handle.my_rights().await {
        Ok(line) => match parser::parse_myrights_line(&line) {
            Ok((_, rights)) => {
                caches.store_rights(&full_name, rights.clone());
                Ok(rights)
            }
            Err(err) => {
                warn!(folder = %full_name, %err, "unparseable MYRIGHTS response, continuing with empty rights");
                Ok(Rights::empty())
            }
        },
        Err(err) if err.is_transport() => Err(err),
        Err(err) if err.is_mailbox_missing() => {
            // Shared folders can vanish between the listing and the rights
            // query.
            debug!(folder = %full_name, %err, "MYRIGHTS on a missing mailbox");
            Ok(Rights::empty())
        }
        Err(err) => {
            warn!(folder = %full_name, %err, "MYRIGHTS failed, continuing with empty rights");
            Ok(Rights::empty())
        }
    }
}
