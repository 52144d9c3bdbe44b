//! Post-processing of the extracted content.
//!
//! Makes URIs absolute, drops `javascript:` links, collapses wrapper
//! `div`/`section` chains, and trims `class` attributes.

use dom_query::{Document, NodeRef};
use url::Url;

use super::tags::{TEXT_BLOCK_TAGS, TEXT_BLOCK_TAG_SET};
use crate::dom;
use crate::error::Error;
use crate::url_utils::{absolute_srcset, resolve_base, to_absolute};
use crate::Options;

/// Elements whose `src`, `poster` and `srcset` are resolved.
const URI_MEDIA_TAGS: [&str; 6] = ["img", "picture", "figure", "video", "audio", "source"];

/// Finish `content` for output.
///
/// An invalid `Options::url` is reported in `warnings` and leaves URIs as
/// they are.
pub fn post_process(content: &NodeRef, doc: &Document, options: &Options, warnings: &mut Vec<Error>) {
    let base_href = dom::select_first(doc, "base[href]").and_then(|base| dom::attr(&base, "href"));
    match resolve_base(options.url.as_deref(), base_href.as_deref()) {
        Ok(Some(base)) => fix_relative_uris(content, &base),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "cannot resolve base url");
            warnings.push(err);
        }
    }
    replace_javascript_links(content);
    simplify_nested_elements(content);
    if !options.keep_classes {
        clean_classes(content, options);
    }
}

/// Resolve relative `href`, `src`, `poster` and `srcset` values against `base`.
pub fn fix_relative_uris(root: &NodeRef, base: &Url) {
    for link in dom::elements_by_tags(root, &["a"]) {
        if let Some(href) = dom::attr(&link, "href") {
            link.set_attr("href", &to_absolute(&href, base));
        }
    }

    for media in dom::elements_by_tags(root, &URI_MEDIA_TAGS) {
        for name in ["src", "poster"] {
            if let Some(value) = dom::attr(&media, name) {
                media.set_attr(name, &to_absolute(&value, base));
            }
        }
        if let Some(srcset) = dom::attr(&media, "srcset") {
            media.set_attr("srcset", &absolute_srcset(&srcset, base));
        }
    }
}

/// Replace `javascript:` links by their content.
///
/// A link holding a single text node becomes that text; anything else
/// becomes a `span` with the link's children.
pub fn replace_javascript_links(root: &NodeRef) {
    for link in dom::elements_by_tags(root, &["a"]) {
        let is_script = link
            .attr("href")
            .is_some_and(|href| href.trim_start().to_ascii_lowercase().starts_with("javascript:"));
        if !is_script {
            continue;
        }

        let children = link.children();
        let replacement = if children.len() == 1 && children[0].is_text() {
            dom::create_text(&link, &children[0].text())
        } else {
            let span = dom::create_element(&link, "span");
            dom::move_children(&link, &span);
            span
        };
        dom::replace_node(&link, &replacement);
    }
}

fn is_page_wrapper(node: &NodeRef) -> bool {
    node.attr("id").is_some_and(|id| id.starts_with("readability"))
}

/// Remove empty `div`/`section` descendants and unwrap those holding a single
/// `div`/`section`, copying the wrapper's attributes onto the child. The page
/// wrapper is kept.
pub fn simplify_nested_elements(root: &NodeRef) {
    let end = dom::next_node(root, true).map(|n| n.id);
    let mut current = dom::next_node(root, false);
    while let Some(node) = current {
        if end == Some(node.id) {
            break;
        }
        let is_wrapper = dom::is_any_tag(&node, &["div", "section"])
            && !is_page_wrapper(&node);
        if is_wrapper {
            if dom::is_element_without_content(&node) {
                current = dom::remove_and_get_next(&node);
                continue;
            }
            if dom::has_single_tag_inside(&node, "div") || dom::has_single_tag_inside(&node, "section") {
                let child = dom::element_children(&node)[0];
                for (name, value) in dom::attributes(&node) {
                    child.set_attr(&name, &value);
                }
                dom::replace_node(&node, &child);
                current = Some(child);
                continue;
            }
        }
        current = dom::next_node(&node, false);
    }
}

/// Reduce every `class` attribute to the classes `options` preserves.
pub fn clean_classes(root: &NodeRef, options: &Options) {
    let mut nodes = vec![*root];
    nodes.extend(dom::descendant_elements(root));
    for node in nodes {
        let Some(class) = dom::attr(&node, "class") else {
            continue;
        };
        let kept: Vec<&str> = class.split_whitespace().filter(|c| options.preserves_class(c)).collect();
        if kept.is_empty() {
            node.remove_attr("class");
        } else {
            node.set_attr("class", &kept.join(" "));
        }
    }
}

/// Normalized text of each innermost text block of `root`, in order.
#[must_use]
pub fn text_blocks(root: &NodeRef) -> Vec<String> {
    dom::elements_by_tags(root, &TEXT_BLOCK_TAGS)
        .iter()
        .filter(|block| {
            !dom::descendant_elements(block)
                .iter()
                .any(|d| TEXT_BLOCK_TAG_SET.contains(dom::tag_name(d).as_str()))
        })
        .map(|block| dom::inner_text(block, true))
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, select_first};

    fn root<'a>(doc: &'a Document) -> NodeRef<'a> {
        match select_first(doc, "#root") {
            Some(node) => node,
            None => panic!("fixture has no #root"),
        }
    }

    fn base() -> Url {
        match Url::parse("https://example.com/post/1") {
            Ok(url) => url,
            Err(err) => panic!("bad base: {err}"),
        }
    }

    #[test]
    fn test_relative_uris_resolved() {
        let doc = parse(
            r##"<div id="root"><a href="../about">About</a><a href="#top">Top</a>
               <img src="/a.png" srcset="small.png 1x, large.png 2x"><video poster="p.jpg"></video></div>"##,
        );
        fix_relative_uris(&root(&doc), &base());
        let html = root(&doc).inner_html().to_string();
        assert!(html.contains(r#"href="https://example.com/about""#));
        assert!(html.contains(r##"href="#top""##));
        assert!(html.contains(r#"src="https://example.com/a.png""#));
        assert!(html.contains("https://example.com/post/small.png 1x, https://example.com/post/large.png 2x"));
        assert!(html.contains(r#"poster="https://example.com/post/p.jpg""#));
    }

    #[test]
    fn test_javascript_links_replaced() {
        let doc = parse(
            r#"<div id="root"><a href="javascript:void(0)">plain</a> <a href="JavaScript:go()"><b>bold</b></a></div>"#,
        );
        replace_javascript_links(&root(&doc));
        let html = root(&doc).inner_html().to_string();
        assert_eq!(html, "plain <span><b>bold</b></span>");
    }

    #[test]
    fn test_nested_wrappers_collapsed() {
        let doc = parse(
            r#"<div id="root"><div id="readability-page-1" class="page"><div class="outer"><section><p>text</p></section></div><div> </div></div></div>"#,
        );
        simplify_nested_elements(&root(&doc));
        let html = root(&doc).inner_html().to_string();
        assert_eq!(html, r#"<div id="readability-page-1" class="page"><section class="outer"><p>text</p></section></div>"#);
    }

    #[test]
    fn test_classes_trimmed() {
        let doc = parse(r#"<div id="root"><div class="page extra"><p class="lead">x</p></div></div>"#);
        clean_classes(&root(&doc), &Options::default());
        assert_eq!(root(&doc).inner_html().to_string(), r#"<div class="page"><p>x</p></div>"#);
    }

    #[test]
    fn test_text_blocks_innermost() {
        let doc = parse(
            "<div id=\"root\"><h2>Heading</h2><ul><li><p>Item one</p></li><li>Item two</li></ul><p> </p><blockquote><p>Quoted</p></blockquote></div>",
        );
        assert_eq!(text_blocks(&root(&doc)), vec!["Heading", "Item one", "Item two", "Quoted"]);
    }
}
