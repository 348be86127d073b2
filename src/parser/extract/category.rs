use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{first_of, Strategy};
use crate::parser::document::{clean_text, Document};

static BREADCRUMB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)class\s*=\s*["']breadcrumbs?["'][^>]*>(.*?)</nav>"#).unwrap()
});
static TEXT_NODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<>]+)<").unwrap());

const CHAIN: &[Strategy<String>] = &[from_meta, from_ld_section, from_ld_genre, from_breadcrumbs];

/// Resolved category, or `None` when the caller's default applies.
pub fn extract(doc: &Document) -> Option<String> {
    first_of(doc, CHAIN)
}

fn from_meta(doc: &Document) -> Option<String> {
    doc.meta("category")
}

fn from_ld_section(doc: &Document) -> Option<String> {
    let section = match doc.ld_field("articleSection")? {
        Value::String(s) => s.as_str(),
        Value::Array(items) => items.first()?.as_str()?,
        _ => return None,
    };
    Some(clean_text(section)).filter(|s| !s.is_empty())
}

fn from_ld_genre(doc: &Document) -> Option<String> {
    doc.ld_str("genre")
}

/// First meaningful crumb, skipping separators and the "Home" link.
fn from_breadcrumbs(doc: &Document) -> Option<String> {
    let nav = BREADCRUMB_RE.captures(doc.html)?;
    TEXT_NODE_RE
        .captures_iter(&nav[1])
        .map(|c| clean_text(&c[1]))
        .find(|t| {
            t.chars().any(char::is_alphanumeric) && !t.eq_ignore_ascii_case("home")
        })
}
