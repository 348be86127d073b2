use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{first_of, Strategy};
use crate::parser::document::{clean_text, Document};

static META_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p[^>]*class\s*=\s*["']meta["'][^>]*>(.*?)</p>"#).unwrap()
});
static BYLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:Written by|By)\s+([^<|]+)").unwrap());

const CHAIN: &[Strategy<String>] = &[from_ld, from_meta, from_byline];

pub fn extract(doc: &Document) -> Option<String> {
    first_of(doc, CHAIN)
}

fn from_ld(doc: &Document) -> Option<String> {
    let name = match doc.ld_field("author")? {
        Value::String(s) => s.as_str(),
        Value::Array(people) => people.iter().find_map(|p| match p {
            Value::String(s) => Some(s.as_str()),
            other => other.get("name")?.as_str(),
        })?,
        other => other.get("name")?.as_str()?,
    };
    Some(clean_text(name)).filter(|n| !n.is_empty())
}

fn from_meta(doc: &Document) -> Option<String> {
    doc.meta("author")
}

/// "Published 2024-03-01 | Written by NAME" or "By NAME" in `<p class="meta">`.
fn from_byline(doc: &Document) -> Option<String> {
    let line = META_LINE_RE.captures(doc.html)?;
    let by = BYLINE_RE.captures(&line[1])?;
    Some(clean_text(&by[1])).filter(|n| !n.is_empty())
}
