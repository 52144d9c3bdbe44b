//! Metadata read straight from the document tree.
//!
//! These are fallbacks for values that structured metadata did not supply:
//! the article title derived from `<title>`, an in-page publication date and
//! the document language.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::Document;

use crate::dom;
use crate::patterns::TITLE_SEPARATOR;
use crate::text::{char_len, normalize_spaces, word_count};

/// Trimmed text of the first `<title>` element.
#[must_use]
pub fn document_title(doc: &Document) -> String {
    dom::select_first(doc, "title").map_or_else(String::new, |title| dom::inner_text(&title, false))
}

/// Derive the article title from `<title>`, trimming site names and sections.
///
/// Titles with a spaced separator (`|`, `-`, `\`, `/`, `>`, `»`) keep the
/// part before the last separator. If that part is under three words, the
/// part after the first separator is used when it has at least three.
/// Titles with `": "` keep the part after the last colon when it has three
/// or more words, else the part before the first colon unless that has more
/// than five. A colon-derived title of four words or fewer reverts to the
/// full title. Titles outside 15..=150 characters are replaced by the only
/// `<h1>`, when there is exactly one.
#[must_use]
pub fn get_article_title(doc: &Document) -> String {
    let original = document_title(doc);
    let mut title = original.clone();
    let mut from_colon = false;

    if let Some(last) = TITLE_SEPARATOR.find_iter(&original).last() {
        title = original[..last.start()].to_string();
        if word_count(&title) < 3 {
            if let Some(first) = TITLE_SEPARATOR.find(&original) {
                let after = &original[first.end()..];
                if word_count(after) >= 3 {
                    title = after.to_string();
                }
            }
        }
    } else if original.contains(": ") {
        let matches_heading = doc
            .select("h1, h2")
            .nodes()
            .iter()
            .any(|h| dom::inner_text(h, false) == original.trim());
        if !matches_heading {
            from_colon = true;
            let last_colon = original.rfind(':').unwrap_or(0);
            title = original[last_colon + 1..].to_string();
            if word_count(&title) < 3 {
                let first_colon = original.find(':').unwrap_or(0);
                let before = &original[..first_colon];
                title = if word_count(before) > 5 { original.clone() } else { before.to_string() };
            }
        }
    } else {
        let len = char_len(&original);
        if len < 15 || len > 150 {
            let h1s = doc.select("h1");
            if h1s.length() == 1 {
                if let Some(h1) = h1s.nodes().first() {
                    title = dom::inner_text(h1, false);
                }
            }
        }
    }

    let title = normalize_spaces(&title);
    if title.is_empty() || (from_colon && word_count(&title) <= 4) {
        return normalize_spaces(&original);
    }
    title
}

/// Parse a published date in any of the common machine and textual forms.
///
/// Values without a timezone are taken as UTC.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offsets without a colon (`+0200`) are common in meta tags
    for format in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
        "%d %b %Y",  // 15 Jan 2024
    ];
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Publication date marked up in the page body.
///
/// Checks `[itemprop=datePublished]` then `time[pubdate]`, reading
/// `datetime`, then `content`, then the element text.
#[must_use]
pub fn dom_published_time(doc: &Document) -> Option<String> {
    for css in ["[itemprop=datePublished]", "time[pubdate]"] {
        for node in doc.select(css).nodes() {
            let value = node
                .attr("datetime")
                .or_else(|| node.attr("content"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| dom::inner_text(node, true));
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// `<html lang>`, if present and non-empty.
#[must_use]
pub fn document_lang(doc: &Document) -> Option<String> {
    dom::select_first(doc, "html")
        .and_then(|html| html.attr("lang"))
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty())
}
