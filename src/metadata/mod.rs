//! Metadata resolution.
//!
//! Fields come from JSON-LD first, then `<meta>` tags (Dublin Core, Open
//! Graph, plain, Twitter), then the document itself (`<title>`, in-page
//! dates, `<html lang>`). Every text value is entity-unescaped.

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use chrono::{DateTime, Utc};
use dom_query::Document;

use crate::error::Error;
use crate::text::unescape_html_entities;
use crate::Options;

pub use dom_extraction::{document_lang, document_title, dom_published_time, get_article_title, parse_date};
pub use json_ld::extract_json_ld;
pub use meta_tags::{collect_meta_values, examine_meta};

/// Raw metadata strings from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Article title.
    pub title: Option<String>,
    /// Author attribution.
    pub byline: Option<String>,
    /// Short description.
    pub excerpt: Option<String>,
    /// Publishing site name.
    pub site_name: Option<String>,
    /// Publication date, unparsed.
    pub published_time: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Metadata {
    /// Drop blank values.
    #[must_use]
    pub fn non_empty(self) -> Self {
        Self {
            title: present(self.title),
            byline: present(self.byline),
            excerpt: present(self.excerpt),
            site_name: present(self.site_name),
            published_time: present(self.published_time),
        }
    }

    /// Fill missing fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            title: self.title.or(fallback.title),
            byline: self.byline.or(fallback.byline),
            excerpt: self.excerpt.or(fallback.excerpt),
            site_name: self.site_name.or(fallback.site_name),
            published_time: self.published_time.or(fallback.published_time),
        }
    }
}

/// Final metadata for an article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMetadata {
    /// Article title; empty when the document has none.
    pub title: String,
    /// Author attribution from metadata.
    pub byline: Option<String>,
    /// Description from metadata.
    pub excerpt: Option<String>,
    /// Publishing site name.
    pub site_name: Option<String>,
    /// Parsed publication date.
    pub date: Option<DateTime<Utc>>,
    /// Document language.
    pub lang: Option<String>,
}

fn unescape(value: Option<String>) -> Option<String> {
    value.map(|v| unescape_html_entities(&v).into_owned())
}

/// Resolve metadata for `doc`.
///
/// Must run before scripts are stripped, since JSON-LD lives in `<script>`.
/// Non-fatal problems (malformed JSON-LD, unparseable dates) are appended to
/// `warnings`.
pub fn resolve_metadata(doc: &Document, options: &Options, warnings: &mut Vec<Error>) -> ResolvedMetadata {
    let document_title = document_title(doc);

    let json_ld = if options.disable_json_ld {
        Metadata::default()
    } else {
        extract_json_ld(doc, &document_title, warnings)
    };
    let values = collect_meta_values(doc);
    let merged = json_ld.or(examine_meta(&values).non_empty());

    let title = merged.title.unwrap_or_else(|| get_article_title(doc));

    let mut date = None;
    if let Some(value) = &merged.published_time {
        date = parse_date(value);
        if date.is_none() {
            tracing::debug!(value = %value, "unparseable published date");
            warnings.push(Error::metadata(format!("unparseable published date {value:?}"), None));
        }
    }
    if date.is_none() {
        date = dom_published_time(doc).and_then(|value| parse_date(&value));
    }

    let resolved = ResolvedMetadata {
        title: unescape_html_entities(&title).into_owned(),
        byline: unescape(merged.byline),
        excerpt: unescape(merged.excerpt),
        site_name: unescape(merged.site_name),
        date,
        lang: document_lang(doc),
    };
    tracing::debug!(
        title = %resolved.title,
        byline = resolved.byline.is_some(),
        date = resolved.date.is_some(),
        "resolved metadata"
    );
    resolved
}
