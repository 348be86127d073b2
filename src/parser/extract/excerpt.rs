use super::{first_of, Strategy};
use crate::parser::document::Document;

const CHAIN: &[Strategy<String>] = &[from_meta, from_ld];

pub fn extract(doc: &Document) -> String {
    first_of(doc, CHAIN).unwrap_or_default()
}

fn from_meta(doc: &Document) -> Option<String> {
    doc.meta("description")
}

fn from_ld(doc: &Document) -> Option<String> {
    doc.ld_str("description")
}
