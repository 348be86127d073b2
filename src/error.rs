use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that aborts an index build. There is no partial success: the
/// first one of these stops the run.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot read {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    SourceMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("duplicate article {category}/{slug}")]
    DuplicateArticle { category: String, slug: String },
    #[error("article {category}/{slug} uses a reserved slug; search/{slug}.json is the aggregate index")]
    ReservedSlug { category: String, slug: String },
    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure to load the aggregate index from one location.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid index at {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid index location {0:?}")]
    Location(String),
}
