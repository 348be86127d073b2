pub mod document;
pub mod extract;

use crate::model::ArticleRecord;
use document::Document;

/// HTML → prepared document → field strategies → record.
///
/// `slug` and `default_category` come from the file's location; `None`
/// means the document has no title and should be skipped.
pub fn extract_article(html: &str, slug: &str, default_category: &str) -> Option<ArticleRecord> {
    let doc = Document::parse(html);
    extract::extract_all(&doc, slug, default_category)
}
