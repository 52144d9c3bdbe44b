//! HTML meta tag extraction.
//!
//! Collects `<meta>` values keyed by a normalized `vendor:field` name, then
//! resolves each output field through a fixed precedence list: Dublin Core,
//! Open Graph, plain/vendor names, Twitter.

use std::collections::HashMap;

use dom_query::Document;

use super::Metadata;
use crate::patterns::{META_NAME, META_PROPERTY};
use crate::url_utils::is_url;

/// Normalized meta values (`og:title`, `dc:creator`, `parsely-author`, ...).
pub type MetaValues = HashMap<String, String>;

/// Keys consulted for each field, highest precedence first.
const TITLE_KEYS: &[&str] = &[
    "dc:title",
    "dcterm:title",
    "og:title",
    "weibo:article:title",
    "weibo:webpage:title",
    "title",
    "parsely-title",
    "twitter:title",
];

const BYLINE_KEYS: &[&str] = &[
    "dc:creator",
    "dcterm:creator",
    "dc:author",
    "dcterm:author",
    "og:author",
    "og:creator",
    "author",
    "creator",
    "parsely-author",
    "article:author",
    "twitter:creator",
];

const EXCERPT_KEYS: &[&str] = &[
    "dc:description",
    "dcterm:description",
    "og:description",
    "weibo:article:description",
    "weibo:webpage:description",
    "description",
    "twitter:description",
];

const SITE_NAME_KEYS: &[&str] = &["dc:site_name", "og:site_name", "site_name", "twitter:site_name"];

const DATE_KEYS: &[&str] = &[
    "article:published_time",
    "dc:date",
    "dcterm:date",
    "og:published_time",
    "parsely-pub-date",
    "pub-date",
    "date",
    "twitter:published_time",
];

/// Collect meta values.
///
/// `property` may hold several space-separated names (`og:title twitter:title`);
/// each matching one is recorded. `name` is only consulted when `property`
/// yields nothing. Later tags overwrite earlier ones with the same key.
#[must_use]
pub fn collect_meta_values(doc: &Document) -> MetaValues {
    let mut values = MetaValues::new();

    for meta in doc.select("meta").nodes() {
        let Some(content) = meta.attr("content") else {
            continue;
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        let mut matched = false;
        if let Some(property) = meta.attr("property") {
            for m in META_PROPERTY.find_iter(&property) {
                let key: String = m.as_str().to_lowercase().split_whitespace().collect();
                values.insert(key, content.to_string());
                matched = true;
            }
        }

        if !matched {
            if let Some(name) = meta.attr("name").filter(|n| META_NAME.is_match(n)) {
                let key: String = name
                    .to_lowercase()
                    .split_whitespace()
                    .collect::<String>()
                    .replace('.', ":");
                values.insert(key, content.to_string());
            }
        }
    }

    values
}

fn first_of(values: &MetaValues, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| values.get(*key).cloned())
}

/// Resolve metadata fields from collected meta values.
#[must_use]
pub fn examine_meta(values: &MetaValues) -> Metadata {
    let byline = BYLINE_KEYS.iter().find_map(|key| {
        let value = values.get(*key)?;
        // article:author is often a profile URL
        if *key == "article:author" && is_url(value) {
            return None;
        }
        Some(value.clone())
    });

    Metadata {
        title: first_of(values, TITLE_KEYS),
        byline,
        excerpt: first_of(values, EXCERPT_KEYS),
        site_name: first_of(values, SITE_NAME_KEYS),
        published_time: first_of(values, DATE_KEYS),
    }
}
