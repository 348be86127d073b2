use std::path::PathBuf;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::DEFAULT_CATEGORY;
use crate::error::FetchError;
use crate::index::{normalize, INDEX_PATH, LEGACY_PATH};
use crate::model::{IndexEntry, RawArticle};

/// Where a built site can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLocation {
    /// `http(s)` base URL of the deployed site.
    Remote(Url),
    /// Site root on disk.
    Local(PathBuf),
}

impl IndexLocation {
    pub fn parse(s: &str) -> Result<Self, FetchError> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            return Ok(IndexLocation::Local(PathBuf::from(s)));
        }
        let mut url = Url::parse(s).map_err(|_| FetchError::Location(s.to_string()))?;
        if !url.path().ends_with('/') {
            let dir = format!("{}/", url.path());
            url.set_path(&dir);
        }
        Ok(IndexLocation::Remote(url))
    }
}

/// Load the aggregate index, falling back once to the legacy collection.
/// When both fail the error is logged and the collection is empty.
pub async fn load_index(location: &IndexLocation) -> Vec<IndexEntry> {
    let client = Client::new();

    let primary = match fetch(&client, location, INDEX_PATH).await {
        Ok(entries) => return entries,
        Err(e) => e,
    };
    warn!("{}; trying {}", primary, LEGACY_PATH);

    match fetch(&client, location, LEGACY_PATH).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Could not load the article index: {}", e);
            Vec::new()
        }
    }
}

async fn fetch(
    client: &Client,
    location: &IndexLocation,
    rel: &str,
) -> Result<Vec<IndexEntry>, FetchError> {
    let (origin, body) = match location {
        IndexLocation::Remote(base) => {
            let url = base
                .join(rel)
                .map_err(|_| FetchError::Location(format!("{}{}", base, rel)))?;
            let http = |source: reqwest::Error| FetchError::Http {
                url: url.to_string(),
                source,
            };
            let body = client
                .get(url.clone())
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(http)?
                .text()
                .await
                .map_err(http)?;
            (url.to_string(), body)
        }
        IndexLocation::Local(root) => {
            let path = root.join(rel);
            let body = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?;
            (path.display().to_string(), body)
        }
    };

    let items: Vec<Value> = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        origin: origin.clone(),
        source,
    })?;
    let entries = decode_entries(items, &origin);
    info!("Loaded {} entries from {}", entries.len(), origin);
    Ok(entries)
}

/// Entry-by-entry decode: the legacy collection may lack slugs or
/// categories, and one bad entry must not sink the rest.
fn decode_entries(items: Vec<Value>, origin: &str) -> Vec<IndexEntry> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let raw: RawArticle = match serde_json::from_value(item) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping entry {} of {}: {}", i, origin, e);
                    return None;
                }
            };
            let record = normalize(raw, DEFAULT_CATEGORY);
            if record.is_none() {
                warn!("Skipping untitled entry {} of {}", i, origin);
            }
            record.as_ref().map(IndexEntry::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("articles/search")).unwrap();
        dir
    }

    #[test]
    fn parse_location() {
        assert_eq!(
            IndexLocation::parse("dist").unwrap(),
            IndexLocation::Local(PathBuf::from("dist"))
        );
        match IndexLocation::parse("https://udlex.example/site").unwrap() {
            IndexLocation::Remote(url) => {
                assert_eq!(
                    url.join(INDEX_PATH).unwrap().as_str(),
                    "https://udlex.example/site/articles/search/index.json"
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn primary_index_wins() {
        let dir = site();
        std::fs::write(
            dir.path().join(INDEX_PATH),
            r#"[{"title":"New","slug":"new","category":"x","date":null,"excerpt":"","tags":[]}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join(LEGACY_PATH), r#"[{"title":"Old","slug":"old"}]"#).unwrap();

        let entries = load_index(&IndexLocation::Local(dir.path().to_path_buf())).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "new");
    }

    #[tokio::test]
    async fn falls_back_to_legacy_collection() {
        let dir = site();
        std::fs::write(dir.path().join(INDEX_PATH), "not json").unwrap();
        std::fs::write(
            dir.path().join(LEGACY_PATH),
            r#"[{"title":"Old","slug":"old","category":"x","content":"<p>body</p>"}]"#,
        )
        .unwrap();

        let entries = load_index(&IndexLocation::Local(dir.path().to_path_buf())).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "old");
    }

    #[tokio::test]
    async fn legacy_entries_without_slug_or_category_still_load() {
        let dir = site();
        std::fs::write(
            dir.path().join(LEGACY_PATH),
            r#"[{"title":"A","slug":"a","category":"x"},
                {"title":"Bail Hearings"},
                {"title":"Bad","tags":"not-a-list"},
                {"slug":"untitled"}]"#,
        )
        .unwrap();

        let entries = load_index(&IndexLocation::Local(dir.path().to_path_buf())).await;
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.category.as_str(), e.slug.as_str()))
            .collect();
        assert_eq!(pairs, vec![("x", "a"), (DEFAULT_CATEGORY, "bail-hearings")]);
    }

    #[tokio::test]
    async fn both_missing_leaves_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let entries = load_index(&IndexLocation::Local(dir.path().to_path_buf())).await;
        assert!(entries.is_empty());
    }
}
