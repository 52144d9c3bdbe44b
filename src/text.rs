//! Text helpers shared by every phase.

use std::borrow::Cow;

use crate::patterns::{COMMAS, NORMALIZE, TOKENIZE};

/// Trim and collapse runs of whitespace into single spaces.
#[must_use]
pub fn normalize_spaces(text: &str) -> String {
    NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Number of characters (Unicode scalar values).
#[inline]
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Number of whitespace-separated words.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of commas in any script.
#[inline]
#[must_use]
pub fn comma_count(text: &str) -> usize {
    COMMAS.find_iter(text).count()
}

/// Whether `text` is empty or whitespace only.
#[inline]
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Token-overlap similarity of `b` against `a`, in `[0, 1]`.
///
/// Measures how much of `b` (by joined token length) also appears in `a`.
#[must_use]
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let tokens_a: Vec<&str> = TOKENIZE.split(&a_lower).filter(|t| !t.is_empty()).collect();
    let tokens_b: Vec<&str> = TOKENIZE.split(&b_lower).filter(|t| !t.is_empty()).collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let uniq_b: Vec<&str> = tokens_b
        .iter()
        .copied()
        .filter(|t| !tokens_a.contains(t))
        .collect();
    let distance = char_len(&uniq_b.join(" ")) as f64 / char_len(&tokens_b.join(" ")) as f64;
    1.0 - distance
}

/// Decode the HTML entities left in attribute-derived text.
///
/// Handles the five XML entities, `&nbsp;`, and decimal/hex character
/// references. Unknown entities are left as written.
#[must_use]
pub fn unescape_html_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail[1..].find(';').map(|i| i + 1) else {
            out.push_str(tail);
            rest = "";
            break;
        };
        let entity = &tail[1..semi];
        match decode_entity(entity) {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "quot" => Some('"'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            // Out-of-range and NUL references become U+FFFD
            if code == 0 || code > 0x10_FFFF {
                return Some('\u{fffd}');
            }
            Some(char::from_u32(code).unwrap_or('\u{fffd}'))
        }
    }
}
