use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{normalize, resolve_slug, Layout};
use crate::error::BuildError;
use crate::model::{ArticleRecord, RawArticle};
use crate::parser;

/// Read `articles/articles.json`. Unreadable or unparsable input is fatal;
/// untitled entries are dropped.
pub fn load_structured(
    layout: &Layout,
    default_category: &str,
) -> Result<Vec<ArticleRecord>, BuildError> {
    let path = layout.articles_json();
    let raw = read(&path)?;
    let entries: Vec<RawArticle> = serde_json::from_str(&raw)
        .map_err(|source| BuildError::SourceMalformed { path: path.clone(), source })?;

    let total = entries.len();
    let records: Vec<ArticleRecord> = entries
        .into_iter()
        .filter_map(|e| normalize(e, default_category))
        .collect();
    if records.len() < total {
        info!("Dropped {} untitled entries from {}", total - records.len(), path.display());
    }
    Ok(records)
}

/// Scrape every `articles/categories/<bucket>/*.html`, buckets and files in
/// name order. The file stem is the slug and the bucket is the category:
/// pages are served from their bucket, so a category named inside the page
/// that disagrees with it is reported and overridden.
pub fn load_from_html(layout: &Layout) -> Result<Vec<ArticleRecord>, BuildError> {
    let mut records = Vec::new();

    for bucket in bucket_dirs(&layout.categories_dir())? {
        let category = file_name(&bucket);
        for file in html_files(&bucket)? {
            let html = read(&file)?;
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            match parser::extract_article(&html, &stem, &category) {
                Some(mut record) => {
                    if record.category != category {
                        warn!(
                            "{} names category {:?} but lives in bucket {:?}; using the bucket",
                            file.display(),
                            record.category,
                            category
                        );
                        record.category = category.clone();
                    }
                    record.slug = resolve_slug(Some(record.slug.as_str()), &record.title);
                    records.push(record);
                }
                None => debug!("No title in {}, skipping", file.display()),
            }
        }
    }

    Ok(records)
}

/// Bucket names under `articles/categories`, or `None` when there is no
/// such directory.
pub fn list_categories(layout: &Layout) -> Result<Option<Vec<String>>, BuildError> {
    let dir = layout.categories_dir();
    if !dir.is_dir() {
        return Ok(None);
    }
    let names = bucket_dirs(&dir)?.iter().map(|p| file_name(p)).collect();
    Ok(Some(names))
}

fn read(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let unreadable = |source| BuildError::SourceUnreadable {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(unreadable)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(unreadable)?;
    paths.sort();
    Ok(paths)
}

fn bucket_dirs(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    Ok(sorted_entries(dir)?.into_iter().filter(|p| p.is_dir()).collect())
}

fn html_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && is_html(p))
        .collect())
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
