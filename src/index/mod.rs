pub mod source;
pub mod writer;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::error::BuildError;
use crate::model::{ArticleRecord, RawArticle};

/// Aggregate index, relative to the site root.
pub const INDEX_PATH: &str = "articles/search/index.json";
/// Monolithic collection used before per-article files existed.
pub const LEGACY_PATH: &str = "articles/articles.json";

const FALLBACK_SLUG: &str = "article";
/// Stem of the aggregate file inside `articles/search/`.
const RESERVED_SLUG: &str = "index";

/// Where sources and outputs live under a site root.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Layout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn articles_json(&self) -> PathBuf {
        self.root.join(LEGACY_PATH)
    }

    pub fn categories_dir(&self) -> PathBuf {
        self.root.join("articles").join("categories")
    }

    pub fn categories_json(&self) -> PathBuf {
        self.root.join("articles").join("categories.json")
    }

    pub fn search_dir(&self) -> PathBuf {
        self.root.join("articles").join("search")
    }

    pub fn index_json(&self) -> PathBuf {
        self.root.join(INDEX_PATH)
    }

    pub fn record_path(&self, slug: &str) -> PathBuf {
        self.search_dir().join(format!("{}.json", slug))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// `articles/articles.json`
    Structured,
    /// `articles/categories/<bucket>/*.html`
    Html,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub mode: SourceMode,
    pub default_category: String,
}

#[derive(Debug)]
pub struct BuildReport {
    pub articles: usize,
    pub categories: usize,
    pub out_dir: PathBuf,
}

/// Load every record, validate it, and rewrite the search files from scratch.
pub fn build(
    layout: &Layout,
    opts: &BuildOptions,
    progress: &ProgressBar,
) -> Result<BuildReport, BuildError> {
    let records = match opts.mode {
        SourceMode::Structured => source::load_structured(layout, &opts.default_category)?,
        SourceMode::Html => source::load_from_html(layout)?,
    };
    info!("Loaded {} articles ({:?} source)", records.len(), opts.mode);

    check_unique(&records)?;
    let categories = source::list_categories(layout)?;
    if let Some(known) = &categories {
        for r in records.iter().filter(|r| !known.contains(&r.category)) {
            warn!(
                "{}/{} has no bucket under {}",
                r.category,
                r.slug,
                layout.categories_dir().display()
            );
        }
    }

    progress.set_length(records.len() as u64);
    let out_dir = writer::write_outputs(layout, &records, categories.as_deref(), progress)?;

    Ok(BuildReport {
        articles: records.len(),
        categories: categories.map_or(0, |c| c.len()),
        out_dir,
    })
}

/// Validate one `articles.json` entry. Entries without a title are dropped.
pub fn normalize(raw: RawArticle, default_category: &str) -> Option<ArticleRecord> {
    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())?;
    let slug = resolve_slug(raw.slug.as_deref(), &title);
    let category = raw
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default_category.to_string());

    Some(ArticleRecord {
        title,
        slug,
        category,
        tags: raw.tags,
        date: raw.date.filter(|d| !d.trim().is_empty()),
        excerpt: raw.excerpt.unwrap_or_default(),
        seo: raw.seo.unwrap_or_default(),
        author: raw.author.filter(|a| !a.trim().is_empty()),
    })
}

/// Keep a usable slug, repair an unsafe one, or derive one from the title.
pub fn resolve_slug(candidate: Option<&str>, title: &str) -> String {
    let slug = match candidate.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) if is_url_safe(s) => return s.to_string(),
        Some(s) => {
            let repaired = slug::slugify(s);
            warn!("slug {:?} is not URL-safe, using {:?}", s, repaired);
            repaired
        }
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

fn is_url_safe(slug: &str) -> bool {
    !slug.starts_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `(category, slug)` must be unique and no slug may take the aggregate
/// index's file name. A slug reused across categories is allowed, but both
/// share one output file.
pub fn check_unique(records: &[ArticleRecord]) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for r in records {
        if r.slug.eq_ignore_ascii_case(RESERVED_SLUG) {
            return Err(BuildError::ReservedSlug {
                category: r.category.clone(),
                slug: r.slug.clone(),
            });
        }
        if !seen.insert((r.category.as_str(), r.slug.as_str())) {
            return Err(BuildError::DuplicateArticle {
                category: r.category.clone(),
                slug: r.slug.clone(),
            });
        }
        if let Some(other) = owners.insert(r.slug.as_str(), r.category.as_str()) {
            warn!(
                "slug {:?} used in both {:?} and {:?}; {}.json keeps the last one",
                r.slug, other, r.category, r.slug
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, slug: Option<&str>, category: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.map(String::from),
            slug: slug.map(String::from),
            category: category.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_drops_untitled() {
        assert!(normalize(raw(None, Some("x"), None), "general").is_none());
        assert!(normalize(raw(Some("   "), Some("x"), None), "general").is_none());
    }

    #[test]
    fn normalize_derives_slug_and_category() {
        let a = normalize(raw(Some("Renting: A Guide"), None, None), "general").unwrap();
        assert_eq!(a.slug, "renting-a-guide");
        assert_eq!(a.category, "general");
        assert!(a.tags.is_empty());
        assert_eq!(a.excerpt, "");
    }

    #[test]
    fn unsafe_slug_is_repaired() {
        assert_eq!(resolve_slug(Some("../Etc Passwd"), "t"), "etc-passwd");
        assert_eq!(resolve_slug(Some("keep_me-2"), "t"), "keep_me-2");
        assert_eq!(resolve_slug(None, "!!!"), "article");
    }

    #[test]
    fn duplicate_pair_is_fatal() {
        let a = normalize(raw(Some("A"), Some("a"), Some("x")), "general").unwrap();
        let b = normalize(raw(Some("B"), Some("a"), Some("y")), "general").unwrap();
        assert!(check_unique(&[a.clone(), b]).is_ok());
        let err = check_unique(&[a.clone(), a]).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateArticle { ref slug, .. } if slug == "a"));
    }

    #[test]
    fn index_slug_is_reserved() {
        for slug in ["index", "Index"] {
            let a = normalize(raw(Some("Overview"), Some(slug), Some("x")), "general").unwrap();
            let err = check_unique(&[a]).unwrap_err();
            assert!(matches!(err, BuildError::ReservedSlug { .. }));
        }
        let ok = normalize(raw(Some("Index funds"), Some("index-funds"), Some("x")), "general").unwrap();
        assert!(check_unique(&[ok]).is_ok());
    }
}
