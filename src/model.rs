use serde::{Deserialize, Serialize};

/// Search-engine metadata attached to every article file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Canonical article metadata. Field order is the on-disk order of
/// `articles/search/<slug>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Listing projection of [`ArticleRecord`], one element of `index.json`.
///
/// Also used to read the legacy `articles.json`, so everything except the
/// title and slug tolerates being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl From<&ArticleRecord> for IndexEntry {
    fn from(a: &ArticleRecord) -> Self {
        IndexEntry {
            title: a.title.clone(),
            slug: a.slug.clone(),
            category: a.category.clone(),
            date: a.date.clone(),
            excerpt: a.excerpt.clone(),
            tags: a.tags.clone(),
            author: a.author.clone(),
        }
    }
}

/// Loose shape of an `articles.json` entry before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub author: Option<String>,
}

fn nullable_tags<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            title: "Moving out".into(),
            slug: "moving-out".into(),
            category: "housing".into(),
            tags: vec!["lease".into()],
            date: None,
            excerpt: String::new(),
            seo: Seo::default(),
            author: None,
        }
    }

    #[test]
    fn record_field_order_and_absent_author() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Moving out","slug":"moving-out","category":"housing","tags":["lease"],"date":null,"excerpt":"","seo":{}}"#
        );
    }

    #[test]
    fn index_entry_projection_order() {
        let mut r = record();
        r.author = Some("Ana".into());
        let json = serde_json::to_string(&IndexEntry::from(&r)).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Moving out","slug":"moving-out","category":"housing","date":null,"excerpt":"","tags":["lease"],"author":"Ana"}"#
        );
    }

    #[test]
    fn legacy_entry_tolerates_missing_and_null_fields() {
        let e: IndexEntry =
            serde_json::from_str(r#"{"title":"T","slug":"t","tags":null,"content":"<p>x</p>"}"#)
                .unwrap();
        assert!(e.tags.is_empty());
        assert_eq!(e.excerpt, "");
        assert_eq!(e.date, None);
    }
}
