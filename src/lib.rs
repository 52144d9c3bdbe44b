//! # rs-readability
//!
//! Heuristic extraction of the readable content of a web page.
//!
//! The library scores paragraph-like elements, picks the subtree that holds
//! the article, strips navigation, ads and other boilerplate from it, and
//! resolves title, byline, date and excerpt from JSON-LD, `<meta>` tags and
//! the document itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability::parse;
//!
//! let html = r#"<html><head><title>Council Approves New Library Budget</title></head>
//! <body><article><p>Main content here.</p></article></body></html>"#;
//!
//! let article = parse(html)?;
//! assert_eq!(article.title, "Council Approves New Library Budget");
//! assert!(article.text_content.contains("Main content here."));
//! # Ok::<(), rs_readability::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Content Extraction**: candidate scoring, sibling assembly, and up to
//!   four attempts with progressively relaxed heuristics
//! - **Cleaning**: forms, embeds, share widgets, layout tables and link farms
//!   are removed; data tables are kept
//! - **Metadata**: title, byline, date, excerpt, site name, language and
//!   text direction
//! - **Byte Input**: charset detection for `parse_bytes`
//!
//! The library emits `tracing` events and never installs a subscriber.

mod error;
mod extract;
mod options;
mod patterns;
mod readerable;
mod result;

/// DOM operations over the `dom_query` arena.
pub mod dom;

/// Whitespace normalization, entity unescaping and text similarity.
pub mod text;

/// Document normalization before scoring.
pub mod html_processing;

/// Candidate scoring, article assembly, cleaning and the retry controller.
pub mod extractor;

/// Metadata resolution (JSON-LD, meta tags, document fallbacks).
pub mod metadata;

/// URL resolution helpers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Link and text density measurements.
pub mod link_density;

// Public API - re-exports
pub use error::{Error, ErrorKind, Phase, Result};
pub use options::{Options, ReaderableOptions};
pub use readerable::is_probably_readerable;
pub use result::{Article, ContentType};

/// Extracts the article of an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_readability::parse;
///
/// let article = parse("<html><body><p>Hello, reader.</p></body></html>")?;
/// assert!(article.content.contains("readability-page-1"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn parse(html: &str) -> Result<Article> {
    parse_with_options(html, &Options::default())
}

/// Extracts the article of an HTML document with custom options.
///
/// # Errors
///
/// - [`ErrorKind::Validation`] for empty input, or more elements than
///   `max_elems_to_parse`
/// - [`ErrorKind::Extraction`] when the body holds nothing at all
///
/// # Example
///
/// ```rust
/// use rs_readability::{parse_with_options, Options};
///
/// let html = r#"<html><body><p class="lead intro">Short page.</p></body></html>"#;
/// let options = Options {
///     char_threshold: 250,
///     keep_classes: true,
///     ..Options::default()
/// };
/// let article = parse_with_options(html, &options)?;
/// assert!(article.content.contains("lead intro"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
pub fn parse_with_options(html: &str, options: &Options) -> Result<Article> {
    extract::extract_content(html, options)
}

/// Extracts the article of HTML bytes with automatic encoding detection.
///
/// # Character Encoding
///
/// The encoding is taken from, in order:
/// - a byte-order mark
/// - `<meta charset="...">`
/// - `<meta http-equiv="Content-Type" content="...; charset=...">`
/// - UTF-8 otherwise
///
/// Invalid sequences are replaced with U+FFFD rather than causing errors.
///
/// # Example
///
/// ```rust
/// use rs_readability::parse_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
/// let article = parse_bytes(html)?;
/// assert!(article.text_content.contains("Café"));
/// # Ok::<(), rs_readability::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn parse_bytes(html: &[u8]) -> Result<Article> {
    parse_bytes_with_options(html, &Options::default())
}

/// Extracts the article of HTML bytes with custom options and automatic
/// encoding detection.
///
/// # Errors
///
/// [`ErrorKind::Parse`] for binary input, plus everything
/// [`parse_with_options`] returns.
pub fn parse_bytes_with_options(html: &[u8], options: &Options) -> Result<Article> {
    let html = encoding::decode_html(html)?;
    parse_with_options(&html, options)
}
