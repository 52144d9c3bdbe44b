//! JSON-LD metadata.
//!
//! Reads Schema.org article data from `<script type="application/ld+json">`.
//! The script is parsed into a [`serde_json::Value`]; only `headline`,
//! `name`, `author`, `description`, `publisher` and `datePublished` are read
//! from the matching object.

use dom_query::Document;
use serde_json::{Map, Value};

use super::Metadata;
use crate::error::{Error, Result};
use crate::patterns::{JSON_LD_ARTICLE_TYPES, SCHEMA_ORG};
use crate::text::text_similarity;

/// Similarity above which `name`/`headline` is taken to match the page title.
const TITLE_MATCH_THRESHOLD: f64 = 0.75;

type Object = Map<String, Value>;

/// String value of `key`, trimmed. Non-string values yield `None`.
fn string_member(object: &Object, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(|value| value.trim().to_string())
}

fn has_article_type(object: &Object) -> bool {
    match object.get("@type") {
        Some(Value::String(kind)) => JSON_LD_ARTICLE_TYPES.is_match(kind),
        Some(Value::Array(kinds)) => {
            kinds.iter().filter_map(Value::as_str).any(|kind| JSON_LD_ARTICLE_TYPES.is_match(kind))
        }
        _ => false,
    }
}

fn has_schema_context(object: &Object) -> bool {
    match object.get("@context") {
        Some(Value::String(context)) => SCHEMA_ORG.is_match(context),
        Some(Value::Object(context)) => {
            context.get("@vocab").and_then(Value::as_str).is_some_and(|vocab| SCHEMA_ORG.is_match(vocab))
        }
        _ => false,
    }
}

fn first_article_object(values: &[Value]) -> Option<&Object> {
    values.iter().filter_map(Value::as_object).find(|object| has_article_type(object))
}

fn byline(object: &Object) -> Option<String> {
    match object.get("author")? {
        Value::String(name) => Some(name.trim().to_string()),
        Value::Object(author) => string_member(author, "name"),
        Value::Array(authors) => {
            let names: Vec<String> = authors
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|author| string_member(author, "name"))
                .collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        _ => None,
    }
}

fn title(object: &Object, document_title: &str) -> Option<String> {
    let name = string_member(object, "name");
    let headline = string_member(object, "headline");
    match (name, headline) {
        (Some(name), Some(headline)) if name != headline => {
            let name_matches = text_similarity(&name, document_title) > TITLE_MATCH_THRESHOLD;
            let headline_matches = text_similarity(&headline, document_title) > TITLE_MATCH_THRESHOLD;
            if headline_matches && !name_matches {
                Some(headline)
            } else {
                Some(name)
            }
        }
        (Some(name), _) => Some(name),
        (None, headline) => headline,
    }
}

/// Read one JSON-LD script. `Ok(None)` means the script is valid but is not
/// Schema.org article data.
pub fn read_script(content: &str, document_title: &str) -> Result<Option<Metadata>> {
    let content = content.trim();
    let content = content.strip_prefix("<![CDATA[").unwrap_or(content);
    let content = content.strip_suffix("]]>").unwrap_or(content).trim();

    let parsed: Value = serde_json::from_str(content)
        .map_err(|err| Error::metadata("malformed JSON-LD", Some(Box::new(err))))?;

    let mut object = match &parsed {
        Value::Array(values) => match first_article_object(values) {
            Some(object) => object,
            None => return Ok(None),
        },
        Value::Object(object) => object,
        _ => return Ok(None),
    };

    if !has_schema_context(object) {
        return Ok(None);
    }

    if !object.contains_key("@type") {
        if let Some(Value::Array(graph)) = object.get("@graph") {
            match first_article_object(graph) {
                Some(found) => object = found,
                None => return Ok(None),
            }
        }
    }
    if !has_article_type(object) {
        return Ok(None);
    }

    let metadata = Metadata {
        title: title(object, document_title),
        byline: byline(object),
        excerpt: string_member(object, "description"),
        site_name: object
            .get("publisher")
            .and_then(Value::as_object)
            .and_then(|publisher| string_member(publisher, "name")),
        published_time: string_member(object, "datePublished"),
    };

    Ok(Some(metadata.non_empty()))
}

/// Metadata from the first JSON-LD script that describes an article.
///
/// Malformed scripts are skipped; their errors are appended to `warnings`.
pub fn extract_json_ld(doc: &Document, document_title: &str, warnings: &mut Vec<Error>) -> Metadata {
    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        match read_script(&script.text(), document_title) {
            Ok(Some(metadata)) => return metadata,
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(error = %err, "skipping JSON-LD script");
                warnings.push(err);
            }
        }
    }
    Metadata::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn read(content: &str) -> Option<Metadata> {
        match read_script(content, "") {
            Ok(metadata) => metadata,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_simple_article_schema() {
        let metadata = read(
            r#"{
                "@context": "https://schema.org",
                "@type": "NewsArticle",
                "headline": "Test Article Title",
                "description": "This is the article description.",
                "datePublished": "2024-01-15T10:30:00Z",
                "author": {"@type": "Person", "name": "John Doe"},
                "publisher": {"@type": "Organization", "name": "Example News"}
            }"#,
        );
        let Some(metadata) = metadata else { panic!("expected article metadata") };
        assert_eq!(metadata.title.as_deref(), Some("Test Article Title"));
        assert_eq!(metadata.byline.as_deref(), Some("John Doe"));
        assert_eq!(metadata.excerpt.as_deref(), Some("This is the article description."));
        assert_eq!(metadata.site_name.as_deref(), Some("Example News"));
        assert_eq!(metadata.published_time.as_deref(), Some("2024-01-15T10:30:00Z"));
    }

    #[test]
    fn test_author_array_joined() {
        let metadata = read(
            r#"{"@context":"http://schema.org/","@type":"BlogPosting","author":[{"name":"A. One"},{"name":"B. Two"},{"url":"x"}]}"#,
        );
        assert_eq!(metadata.and_then(|m| m.byline).as_deref(), Some("A. One, B. Two"));
    }

    #[test]
    fn test_graph_searched_for_article() {
        let metadata = read(
            r#"{"@context":"https://schema.org","@graph":[{"@type":"WebSite","name":"Site"},{"@type":"Article","headline":"From graph"}]}"#,
        );
        assert_eq!(metadata.and_then(|m| m.title).as_deref(), Some("From graph"));
    }

    #[test]
    fn test_non_article_type_ignored() {
        assert!(read(r#"{"@context":"https://schema.org","@type":"Recipe","name":"Soup"}"#).is_none());
        assert!(read(r#"{"@context":"https://example.org","@type":"Article","name":"X"}"#).is_none());
    }

    #[test]
    fn test_escapes_and_nested_braces_in_strings() {
        let metadata = read(
            r#"{"@context":"https://schema.org","@type":["Article","Thing"],"description":"{not} [an] \"object\"","headline":"Café news"}"#,
        );
        let Some(metadata) = metadata else { panic!("expected article metadata") };
        assert_eq!(metadata.excerpt.as_deref(), Some(r#"{not} [an] "object""#));
        assert_eq!(metadata.title.as_deref(), Some("Café news"));
    }

    #[test]
    fn test_name_versus_headline_uses_title_similarity() {
        let script = r#"{"@context":"https://schema.org","@type":"Article","name":"Example Site","headline":"Interesting things happened today"}"#;
        let picked = read_script(script, "Interesting things happened today").ok().flatten();
        assert_eq!(picked.and_then(|m| m.title).as_deref(), Some("Interesting things happened today"));

        let picked = read_script(script, "Something else entirely").ok().flatten();
        assert_eq!(picked.and_then(|m| m.title).as_deref(), Some("Example Site"));
    }

    #[test]
    fn test_malformed_script_is_metadata_error() {
        let err = read_script(r#"{"@context":"https://schema.org","@type":"Article","name":"X""#, "");
        match err {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Metadata),
            Ok(v) => panic!("expected Err(_), got Ok({v:?})"),
        }
    }

    #[test]
    fn test_extract_json_ld_records_warning_and_continues() {
        let doc = Document::from(
            r#"<html><head>
            <script type="application/ld+json">{ broken </script>
            <script type="application/ld+json">{"@context":"https://schema.org","@type":"Article","headline":"Second"}</script>
            </head><body></body></html>"#,
        );
        let mut warnings = Vec::new();
        let metadata = extract_json_ld(&doc, "", &mut warnings);
        assert_eq!(metadata.title.as_deref(), Some("Second"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_top_level_array_picks_article() {
        let metadata = read(
            r#"[{"@context":"https://schema.org","@type":"BreadcrumbList"},{"@context":"https://schema.org","@type":"Report","headline":"Annual report","datePublished":"2023-06-01"}]"#,
        );
        let Some(metadata) = metadata else { panic!("expected article metadata") };
        assert_eq!(metadata.title.as_deref(), Some("Annual report"));
        assert_eq!(metadata.published_time.as_deref(), Some("2023-06-01"));
    }

    #[test]
    fn test_vocab_context_and_non_string_fields() {
        let metadata = read(
            r#"{"@context":{"@vocab":"https://schema.org/"},"@type":"Article","headline":"Vocab","description":42,"author":null}"#,
        );
        let Some(metadata) = metadata else { panic!("expected article metadata") };
        assert_eq!(metadata.title.as_deref(), Some("Vocab"));
        assert!(metadata.excerpt.is_none());
        assert!(metadata.byline.is_none());
    }

    #[test]
    fn test_scalar_script_is_not_article() {
        assert!(read("\"just a string\"").is_none());
    }
}
