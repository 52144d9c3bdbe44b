//! Charset detection and transcoding for byte input.
//!
//! The declared charset is read from the first 1024 bytes (`<meta charset>`,
//! then `http-equiv` content-type). Unknown or missing labels fall back to
//! UTF-8. Decoding is lossy: malformed sequences become U+FFFD.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

use crate::error::{Error, Result};

/// Bytes inspected for a charset declaration and for binary content.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">`
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_:.\-]+)"#).expect("META_CHARSET regex")
});

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([A-Za-z0-9_:.\-]+)"#,
    )
    .expect("HTTP_EQUIV_CHARSET regex")
});

fn declared_label(head: &[u8]) -> Option<&[u8]> {
    META_CHARSET
        .captures(head)
        .or_else(|| HTTP_EQUIV_CHARSET.captures(head))
        .and_then(|c| c.get(1))
        .map(|m| m.as_bytes())
}

/// Encoding declared in the document head, or UTF-8.
///
/// Labels are resolved per the WHATWG Encoding Standard, so `ISO-8859-1`
/// maps to `windows-1252`.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(SNIFF_LEN)];
    declared_label(head)
        .and_then(Encoding::for_label)
        .unwrap_or(UTF_8)
}

/// Decode `html` to UTF-8.
///
/// A byte-order mark overrides the declared charset. Input whose first
/// 1024 bytes contain a NUL is rejected as binary.
pub fn decode_html(html: &[u8]) -> Result<String> {
    let head = &html[..html.len().min(SNIFF_LEN)];
    let (encoding, bom_len) = Encoding::for_bom(html).unwrap_or((detect_encoding(html), 0));
    // UTF-16 legitimately contains NULs
    if encoding != encoding_rs::UTF_16LE && encoding != encoding_rs::UTF_16BE && head.contains(&0) {
        return Err(Error::parse("input looks like binary data"));
    }

    let (decoded, had_errors) = encoding.decode_without_bom_handling(&html[bom_len..]);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced malformed byte sequences");
    }
    Ok(decoded.into_owned())
}
