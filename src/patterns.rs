//! Compiled regex patterns for content extraction.
//!
//! All patterns are compiled once at first use with `LazyLock` and never
//! mutated, so they are shared freely across concurrent parses.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Candidate Classification
// =============================================================================

/// Class/id strings of elements that are unlikely to hold article content.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATES regex")
});

/// Exceptions that rescue an otherwise unlikely candidate.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|mathjax|shadow")
        .expect("MAYBE_CANDIDATE regex")
});

/// Class/id fragments that raise the class weight.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story",
    )
    .expect("POSITIVE regex")
});

/// Class/id fragments that lower the class weight.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|footer|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|widget",
    )
    .expect("NEGATIVE regex")
});

/// Class/id strings of author attribution elements.
pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE regex")
});

/// Share widgets.
pub static SHARE_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b|_)(share|sharedaddy)(\b|_)").expect("SHARE_ELEMENTS regex")
});

/// Default allow-list of embed hosts.
pub static VIDEOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)//(www\.)?((dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq|bilibili|live\.bilibili)\.com|(archive|upload\.wikimedia)\.org|player\.twitch\.tv)",
    )
    .expect("VIDEOS regex")
});

/// Link text worth keeping when its container is discarded.
pub static IMPORTANT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(read\s+(the\s+)?(more|full)|continue\s+reading|full\s+(story|article)|keep\s+reading|view\s+(more|full)|learn\s+more|more\s+details)\b",
    )
    .expect("IMPORTANT_LINK regex")
});

/// Whole-text advertisement labels.
pub static AD_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?iu)^(ad(vertising|vertisement)?|pub(licité)?|werb(ung)?|广告|Реклама|Anuncio)$")
        .expect("AD_WORDS regex")
});

/// Whole-text loading placeholders.
pub static LOADING_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?iu)^((loading|正在加载|Загрузка|chargement|cargando)(…|\.\.\.)?)$")
        .expect("LOADING_WORDS regex")
});

// =============================================================================
// Table Classification
// =============================================================================

/// Class/id keywords of layout tables.
pub static LAYOUT_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(layout|grid|wrapper|container|spacer|presentation|frame)\b")
        .expect("LAYOUT_TABLE regex")
});

/// Class/id keywords of navigation tables.
pub static NAVIGATION_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[-_\s])(nav|navbar|navigation|menu|breadcrumbs?|toolbar)($|[-_\s])")
        .expect("NAVIGATION_TABLE regex")
});

/// Class/id keywords of data tables.
pub static DATA_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(data|datatable|stats|statistics|results|financial|schedule|pricing|comparison|specs|wikitable|sortable)\b",
    )
    .expect("DATA_TABLE regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// Runs of two or more whitespace characters.
pub static NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("NORMALIZE regex"));

/// Word separators for similarity tokens.
pub static TOKENIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("TOKENIZE regex"));

/// Commas as used in Latin, Sindhi, Chinese and various other scripts.
pub static COMMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x{002C}|\x{060C}|\x{FE50}|\x{FE10}|\x{FE11}|\x{2E41}|\x{2E34}|\x{2E32}|\x{FF0C}")
        .expect("COMMAS regex")
});

/// Fragment-only links (`#section`).
pub static HASH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#.+").expect("HASH_URL regex"));

/// Sentence end inside short paragraphs.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_END regex"));

// =============================================================================
// Images and URLs
// =============================================================================

/// Base64 `data:` URL prefix, capturing the MIME type.
pub static B64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:\s*([^\s;,]+)\s*;\s*base64\s*,").expect("B64_DATA_URL regex")
});

/// Any value mentioning an image file extension.
pub static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)").expect("IMAGE_EXTENSION regex"));

/// A srcset-style value (`a.jpg 2x`).
pub static IMAGE_SRCSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)\s+\d").expect("IMAGE_SRCSET regex"));

/// A single image URL.
pub static IMAGE_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpg|jpeg|png|webp)\S*\s*$").expect("IMAGE_SRC regex")
});

/// One candidate of a srcset list: URL, optional descriptor, separator.
pub static SRCSET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+)(\s+[\d.]+[xw])?(\s*(?:,|$))").expect("SRCSET_URL regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// `property` values of interest: `vendor:field`, possibly several per attribute.
pub static META_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*(article|dc|dcterm|og|twitter)\s*:\s*(author|creator|description|published_time|title|site_name)\s*",
    )
    .expect("META_PROPERTY regex")
});

/// `name` values of interest, with an optional vendor prefix.
pub static META_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(dc|dcterm|og|twitter|parsely|weibo:(?:article|webpage))\s*[-\.:]\s*)?(author|creator|pub-date|date|description|title|site_name)\s*$",
    )
    .expect("META_NAME regex")
});

/// Schema.org types treated as articles.
pub static JSON_LD_ARTICLE_TYPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|AskPublicNewsArticle|BackgroundNewsArticle|OpinionNewsArticle|ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|BlogPosting|LiveBlogPosting|DiscussionForumPosting|TechArticle|APIReference)$",
    )
    .expect("JSON_LD_ARTICLE_TYPES regex")
});

/// Schema.org context URL.
pub static SCHEMA_ORG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?:)?//(www\.)?schema\.org(/.*)?$|^schema\.org$").expect("SCHEMA_ORG regex")
});

/// Hierarchical title separators surrounded by spaces.
pub static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" [\|\-\\/>»] ").expect("TITLE_SEPARATOR regex"));

/// Inline `display: none`.
pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex"));

/// Inline `visibility: hidden`.
pub static VISIBILITY_HIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)visibility\s*:\s*hidden").expect("VISIBILITY_HIDDEN regex"));
