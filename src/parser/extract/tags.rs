use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{first_of, Strategy};
use crate::parser::document::{clean_text, split_list, Document};

static INLINE_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Tags:\s*([^<]+)<").unwrap());

// A source only wins when it yields at least one tag; it is never merged with the others.
const CHAIN: &[Strategy<Vec<String>>] = &[from_ld_keywords, from_meta, from_inline];

pub fn extract(doc: &Document) -> Vec<String> {
    first_of(doc, CHAIN).unwrap_or_default()
}

fn non_empty(tags: Vec<String>) -> Option<Vec<String>> {
    Some(tags).filter(|t| !t.is_empty())
}

fn from_ld_keywords(doc: &Document) -> Option<Vec<String>> {
    let tags = match doc.ld_field("keywords")? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(clean_text)
            .filter(|t| !t.is_empty())
            .collect(),
        Value::String(s) => split_list(s),
        _ => return None,
    };
    non_empty(tags)
}

fn from_meta(doc: &Document) -> Option<Vec<String>> {
    non_empty(split_list(&doc.meta("keywords")?))
}

fn from_inline(doc: &Document) -> Option<Vec<String>> {
    let caps = INLINE_TAGS_RE.captures(doc.html)?;
    non_empty(split_list(&caps[1]))
}
