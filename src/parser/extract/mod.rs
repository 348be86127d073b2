pub mod author;
pub mod category;
pub mod excerpt;
pub mod tags;
pub mod title;

use super::document::Document;
use crate::model::{ArticleRecord, Seo};

/// One way of reading a field out of a document.
pub type Strategy<T> = fn(&Document) -> Option<T>;

/// Run the strategies in order; the first one that finds something wins.
pub fn first_of<T>(doc: &Document, chain: &[Strategy<T>]) -> Option<T> {
    chain.iter().find_map(|strategy| strategy(doc))
}

/// Publish date comes from JSON-LD only; there is no text fallback.
pub fn date(doc: &Document) -> Option<String> {
    doc.ld_str("datePublished")
}

pub fn extract_all(doc: &Document, slug: &str, default_category: &str) -> Option<ArticleRecord> {
    let title = title::extract(doc)?;
    let excerpt = excerpt::extract(doc);
    let category = category::extract(doc).unwrap_or_else(|| default_category.to_string());

    Some(ArticleRecord {
        seo: Seo {
            title: Some(title.clone()),
            description: Some(excerpt.clone()),
        },
        title,
        slug: slug.to_string(),
        category,
        tags: tags::extract(doc),
        date: date(doc),
        excerpt,
        author: author::extract(doc),
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn extract(name: &str, default_category: &str) -> Option<ArticleRecord> {
        let html = fixture(name);
        let doc = Document::parse(&html);
        extract_all(&doc, name, default_category)
    }

    #[test]
    fn jsonld_article() {
        let a = extract("deposit-returns", "housing").unwrap();
        assert_eq!(a.title, "Getting your deposit back");
        assert_eq!(a.author.as_deref(), Some("Ana Lima"));
        assert_eq!(a.date.as_deref(), Some("2024-06-01"));
        assert_eq!(a.category, "tenancy");
        assert_eq!(a.excerpt, "What landlords may keep & what they owe you.");
        assert_eq!(a.seo.title.as_deref(), Some("Getting your deposit back"));
        assert_eq!(a.seo.description.as_deref(), Some(a.excerpt.as_str()));
    }

    #[test]
    fn structured_keywords_beat_inline_tags() {
        let a = extract("deposit-returns", "housing").unwrap();
        assert_eq!(a.tags, vec!["a", "b"]);
    }

    #[test]
    fn plain_html_falls_back_to_text_patterns() {
        let a = extract("small-claims", "courts").unwrap();
        assert_eq!(a.title, "Small claims in five steps");
        assert_eq!(a.author.as_deref(), Some("Jo Park"));
        assert_eq!(a.date, None);
        assert_eq!(a.category, "Procedure");
        assert_eq!(a.tags, vec!["court", "claims", "fees"]);
        assert_eq!(a.excerpt, "");
        assert_eq!(a.slug, "small-claims");
    }

    #[test]
    fn malformed_jsonld_falls_through() {
        let a = extract("broken-ld", "work").unwrap();
        assert_eq!(a.title, "Overtime basics");
        assert_eq!(a.author.as_deref(), Some("R. Singh"));
        assert_eq!(a.tags, vec!["wages", "overtime"]);
        assert_eq!(a.excerpt, "When extra hours must be paid.");
        // no meta, no JSON-LD, no breadcrumbs
        assert_eq!(a.category, "work");
    }

    #[test]
    fn headline_used_when_no_heading() {
        let html = r#"<script type="application/ld+json">{"@type":"Article","headline":"From LD","keywords":"x, y"}</script>"#;
        let doc = Document::parse(html);
        let a = extract_all(&doc, "ld-only", "misc").unwrap();
        assert_eq!(a.title, "From LD");
        assert_eq!(a.tags, vec!["x", "y"]);
    }

    #[test]
    fn breadcrumb_is_the_last_category_source() {
        let a = extract("notice-periods", "misc").unwrap();
        assert_eq!(a.title, "Notice periods");
        assert_eq!(a.category, "Leases");
        assert_eq!(a.author, None);
        assert!(a.tags.is_empty());
    }

    #[test]
    fn untitled_document_is_skipped() {
        assert!(extract("untitled", "misc").is_none());
    }
}
