//! Charset decoding of fetched documents
//!
//! PX files in the wild are mostly ISO-8859-x or Windows code pages; labels
//! follow the WHATWG Encoding Standard (`ISO-8859-15`, `latin1`, `utf-8`, ...).

use crate::{Error, Result};
use encoding_rs::Encoding;
use tracing::{debug, warn};

/// Resolve a charset label to an encoding
pub fn lookup(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| Error::encoding(label))
}

/// Decode bytes with the given charset label; a byte order mark overrides the label
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = lookup(label)?;
    let (text, used, had_errors) = encoding.decode(bytes);

    if used != encoding {
        debug!("Byte order mark selected {} over {}", used.name(), encoding.name());
    }
    if had_errors {
        warn!(
            "Document contains byte sequences invalid in {}; replaced with U+FFFD",
            used.name()
        );
    }

    Ok(text.into_owned())
}
