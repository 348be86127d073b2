use std::sync::LazyLock;

use regex::Regex;

use super::{first_of, Strategy};
use crate::parser::document::{clean_text, Document};

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());

const CHAIN: &[Strategy<String>] = &[from_heading, from_ld_headline, from_ld_name];

pub fn extract(doc: &Document) -> Option<String> {
    first_of(doc, CHAIN)
}

fn from_heading(doc: &Document) -> Option<String> {
    let caps = H1_RE.captures(doc.html)?;
    Some(clean_text(&caps[1])).filter(|t| !t.is_empty())
}

fn from_ld_headline(doc: &Document) -> Option<String> {
    doc.ld_str("headline")
}

fn from_ld_name(doc: &Document) -> Option<String> {
    doc.ld_str("name")
}
