//! Result types for extraction output.
//!
//! An [`Article`] is built once at the end of a parse and not modified after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of page the content was extracted from.
///
/// Only the unified article profile is active; the type is reported for
/// consumers that read it but never changes how extraction behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// General readable article.
    #[default]
    Article,
}

/// Readable content extracted from an HTML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article title.
    pub title: String,

    /// Author attribution.
    pub byline: Option<String>,

    /// Publication date.
    pub date: Option<DateTime<Utc>>,

    /// Serialized HTML of the cleaned content subtree.
    pub content: String,

    /// Text content of the cleaned subtree.
    pub text_content: String,

    /// Normalized text of each innermost block of the content.
    pub text_blocks: Vec<String>,

    /// Character count of `text_content`.
    pub length: usize,

    /// Short description, or the first non-empty paragraph.
    pub excerpt: Option<String>,

    /// Name of the publishing site.
    pub site_name: Option<String>,

    /// Text direction (`ltr`/`rtl`) declared around the content.
    pub dir: Option<String>,

    /// Document language from `<html lang>`.
    pub lang: Option<String>,

    /// Page kind; always [`ContentType::Article`].
    pub content_type: ContentType,

    /// Non-fatal issues encountered while extracting.
    pub warnings: Vec<String>,
}
