//! Configuration options for content extraction.
//!
//! The `Options` struct is an immutable snapshot for one parse call. Fields are
//! public; use struct-update syntax over `Options::default()` to tune it.

use regex::Regex;

/// Configuration options for content extraction.
///
/// # Example
///
/// ```rust
/// use rs_readability::Options;
///
/// let options = Options {
///     char_threshold: 250,
///     keep_classes: true,
///     ..Options::default()
/// };
/// assert_eq!(options.nb_top_candidates, 5);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Maximum number of elements to parse. `0` disables the check.
    ///
    /// Default: `0`
    pub max_elems_to_parse: usize,

    /// Number of top candidates tracked when selecting the article root.
    ///
    /// Default: `5`
    pub nb_top_candidates: usize,

    /// Minimum extracted text length (characters) for an attempt to succeed.
    ///
    /// Default: `500`
    pub char_threshold: usize,

    /// Classes kept on elements when `keep_classes` is false.
    ///
    /// Default: `["page"]`
    pub classes_to_preserve: Vec<String>,

    /// Keep every `class` attribute in the output.
    ///
    /// Default: `false`
    pub keep_classes: bool,

    /// Skip JSON-LD metadata.
    ///
    /// Default: `false`
    pub disable_json_ld: bool,

    /// Pattern of embed URLs that survive cleaning. `None` uses the built-in
    /// list of video hosts (YouTube, Vimeo, Dailymotion, Twitch, ...).
    ///
    /// Default: `None`
    pub allowed_video_regex: Option<Regex>,

    /// Move "read more"-style links out of removed footers, asides and navs
    /// into a preserved container, and spare conditionally-cleaned nodes that
    /// hold such links.
    ///
    /// Default: `false`
    pub preserve_important_links: bool,

    /// Added to the link-density thresholds of conditional cleaning.
    ///
    /// Default: `0.0`
    pub link_density_modifier: f64,

    /// Document URL, used as the base for relative URI resolution.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Run the content-type detector and report its result. Extraction is the
    /// same either way.
    ///
    /// Default: `false`
    pub content_type_detection: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_elems_to_parse: 0,
            nb_top_candidates: 5,
            char_threshold: 500,
            classes_to_preserve: vec!["page".to_string()],
            keep_classes: false,
            disable_json_ld: false,
            allowed_video_regex: None,
            preserve_important_links: false,
            link_density_modifier: 0.0,
            url: None,
            content_type_detection: false,
        }
    }
}

impl Options {
    /// Video pattern in effect for this call.
    #[must_use]
    pub fn video_regex(&self) -> &Regex {
        self.allowed_video_regex
            .as_ref()
            .unwrap_or(&*crate::patterns::VIDEOS)
    }

    /// Whether `class` is in the preserved set.
    #[must_use]
    pub fn preserves_class(&self, class: &str) -> bool {
        self.classes_to_preserve.iter().any(|c| c == class)
    }
}

/// Options for [`crate::is_probably_readerable`].
#[derive(Debug, Clone, Copy)]
pub struct ReaderableOptions {
    /// Minimum text length of a node for it to count.
    ///
    /// Default: `140`
    pub min_content_length: usize,

    /// Accumulated score needed to call the document readerable.
    ///
    /// Default: `20.0`
    pub min_score: f64,
}

impl Default for ReaderableOptions {
    fn default() -> Self {
        Self { min_content_length: 140, min_score: 20.0 }
    }
}
