//! Core extraction flow.
//!
//! Parse, validate, resolve metadata, normalize, run the retry controller,
//! post-process, and assemble the [`Article`]. Metadata is read before
//! scripts are stripped because JSON-LD lives in `<script>` elements. A body
//! fallback skips post-processing and keeps its markup as it is.

use crate::dom::{self, Document, NodeRef};
use crate::error::{Error, Result};
use crate::extractor::pipeline;
use crate::extractor::post_process::{post_process, text_blocks};
use crate::html_processing;
use crate::metadata;
use crate::options::Options;
use crate::result::{Article, ContentType};
use crate::text::{char_len, normalize_spaces};

/// Page kind of `doc`.
///
/// Only the unified article profile exists, so every document is an article.
fn detect_content_type(doc: &Document) -> ContentType {
    tracing::trace!(paragraphs = doc.select("p").length(), "content type detection");
    ContentType::Article
}

/// First paragraph of the content with any text.
fn first_paragraph(content: &NodeRef) -> Option<String> {
    dom::elements_by_tags(content, &["p"])
        .iter()
        .map(|p| p.text().trim().to_string())
        .find(|text| !text.is_empty())
}

fn validate(html: &str, doc: &Document, options: &Options) -> Result<()> {
    if html.trim().is_empty() {
        return Err(Error::validation("empty document"));
    }
    if options.max_elems_to_parse > 0 {
        let elements = doc.select("*").length();
        tracing::debug!(elements, limit = options.max_elems_to_parse, "element count");
        if elements > options.max_elems_to_parse {
            return Err(Error::validation(format!(
                "document has {elements} elements, more than the limit of {}",
                options.max_elems_to_parse
            )));
        }
    }
    Ok(())
}

/// Extract the article of `html`.
pub(crate) fn extract_content(html: &str, options: &Options) -> Result<Article> {
    tracing::debug!(len = html.len(), "starting extraction");

    let document = dom::parse(html);
    validate(html, &document, options)?;

    let mut warnings = Vec::new();

    html_processing::unwrap_noscript_images(&document);
    let metadata = metadata::resolve_metadata(&document, options, &mut warnings);
    html_processing::remove_scripts(&document);
    html_processing::prep_document(&document);

    let extraction = pipeline::grab_article(&document, &metadata.title, options)?;
    let root = extraction.content;
    if !extraction.fallback {
        post_process(&root, &document, options, &mut warnings);
    }

    let text_content = root.text().to_string();
    let excerpt = metadata.excerpt.or_else(|| first_paragraph(&root));
    let byline = metadata
        .byline
        .or_else(|| extraction.byline.map(|b| normalize_spaces(&b)))
        .filter(|b| !b.is_empty());
    let content_type = if options.content_type_detection {
        detect_content_type(&document)
    } else {
        ContentType::Article
    };

    for warning in &warnings {
        tracing::debug!(kind = ?warning.kind(), phase = ?warning.phase(), %warning, "non-fatal error");
    }

    let article = Article {
        title: metadata.title,
        byline,
        date: metadata.date,
        content: root.inner_html().to_string(),
        length: char_len(&text_content),
        text_content,
        text_blocks: text_blocks(&root),
        excerpt,
        site_name: metadata.site_name,
        dir: extraction.dir,
        lang: metadata.lang,
        content_type,
        warnings: warnings.iter().map(ToString::to_string).collect(),
    };

    tracing::debug!(
        title = !article.title.is_empty(),
        length = article.length,
        fallback = extraction.fallback,
        attempts = extraction.attempts.len(),
        "extraction finished"
    );
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn prose(n: usize) -> String {
        "The archive opened its reading room to the public, and historians, students, \
         and curious visitors arrived early to see the restored letters. "
            .repeat(n)
    }

    fn extract(html: &str, options: &Options) -> Article {
        match extract_content(html, options) {
            Ok(article) => article,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_byline_from_content_when_metadata_has_none() {
        let html = format!(
            "<html><body><article><p class=\"byline\">By  Sam Writer</p><p>{0}</p><p>{0}</p></article></body></html>",
            prose(3)
        );
        let article = extract(&html, &Options::default());
        assert_eq!(article.byline.as_deref(), Some("By Sam Writer"));
        assert!(!article.content.contains("Sam Writer"));
    }

    #[test]
    fn test_excerpt_falls_back_to_first_paragraph() {
        let html = format!("<html><body><article><p>{0}</p><p>{0}</p></article></body></html>", prose(3));
        let article = extract(&html, &Options::default());
        let Some(excerpt) = article.excerpt else {
            panic!("expected an excerpt");
        };
        assert!(excerpt.starts_with("The archive opened"));
    }

    #[test]
    fn test_element_limit() {
        let options = Options { max_elems_to_parse: 3, ..Options::default() };
        match extract_content("<html><body><div><p>a</p><p>b</p></div></body></html>", &options) {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Validation),
            Ok(_) => panic!("expected a validation error"),
        }
    }

    #[test]
    fn test_whitespace_input_is_invalid() {
        match extract_content("  \n ", &Options::default()) {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Validation),
            Ok(_) => panic!("expected a validation error"),
        }
    }

    #[test]
    fn test_content_type_always_article() {
        let options = Options { content_type_detection: true, ..Options::default() };
        let html = format!("<html><body><p>{}</p></body></html>", prose(5));
        assert_eq!(extract(&html, &options).content_type, ContentType::Article);
    }
}
