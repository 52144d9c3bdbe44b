//! URL helpers for metadata checks and relative URI resolution.

use url::Url;

use crate::error::{Error, Phase, Result};
use crate::patterns::SRCSET_URL;

/// Check whether a string is an absolute `http(s)` URL with a host.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether the URL is absolute and the parsed URL if so
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Whether `s` looks like a URL rather than a name (used to reject
/// `article:author` profile links).
#[must_use]
pub fn is_url(s: &str) -> bool {
    is_absolute_url(s).0
}

/// Resolve the base URL for the document.
///
/// `<base href>` is joined onto the document URL when both are present.
/// A `<base href>` alone only counts when it is itself absolute.
///
/// # Errors
/// Returns a `Cleanup` error when the document URL cannot be parsed; the
/// caller records it and skips URI resolution.
pub fn resolve_base(document_url: Option<&str>, base_href: Option<&str>) -> Result<Option<Url>> {
    let base_href = base_href.map(str::trim).filter(|h| !h.is_empty());

    let Some(document_url) = document_url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(base_href.and_then(|h| is_absolute_url(h).1));
    };

    let document = Url::parse(document_url).map_err(|err| {
        Error::cleanup(Phase::PostProcess, format!("invalid document URL {document_url:?}"), Some(Box::new(err)))
    })?;

    match base_href {
        Some(href) => Ok(Some(document.join(href).unwrap_or(document))),
        None => Ok(Some(document)),
    }
}

/// Convert a relative URI to absolute form against `base`.
///
/// Fragment-only links, and `data:`, `javascript:`, `mailto:` and `tel:`
/// URIs, are returned unchanged. So is anything that fails to join.
#[must_use]
pub fn to_absolute(uri: &str, base: &Url) -> String {
    let uri = uri.trim();
    if uri.is_empty() || uri.starts_with('#') {
        return uri.to_string();
    }

    let lower = uri.to_ascii_lowercase();
    if ["data:", "javascript:", "mailto:", "tel:"].iter().any(|p| lower.starts_with(p)) {
        return uri.to_string();
    }

    if is_url(uri) {
        return uri.to_string();
    }

    match base.join(uri) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => uri.to_string(),
    }
}

/// Resolve every candidate URL in a `srcset` value, keeping the descriptors.
#[must_use]
pub fn absolute_srcset(srcset: &str, base: &Url) -> String {
    SRCSET_URL
        .replace_all(srcset, |caps: &regex::Captures<'_>| {
            let url = caps.get(1).map_or("", |m| m.as_str());
            let descriptor = caps.get(2).map_or("", |m| m.as_str());
            let separator = caps.get(3).map_or("", |m| m.as_str());
            format!("{}{descriptor}{separator}", to_absolute(url, base))
        })
        .into_owned()
}
