use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{info, warn};

use super::Layout;
use crate::error::BuildError;
use crate::model::{ArticleRecord, IndexEntry};

/// Write `categories.json`, one `<slug>.json` per record and `index.json`,
/// in input order. Returns the search output directory.
pub fn write_outputs(
    layout: &Layout,
    records: &[ArticleRecord],
    categories: Option<&[String]>,
    progress: &ProgressBar,
) -> Result<PathBuf, BuildError> {
    let out_dir = layout.search_dir();
    fs::create_dir_all(&out_dir).map_err(|source| BuildError::OutputDir {
        path: out_dir.clone(),
        source,
    })?;

    // The categories listing is a side artifact; losing it does not fail the build.
    if let Some(categories) = categories {
        let path = layout.categories_json();
        if let Err(e) = write_json(&path, categories) {
            warn!("Skipping categories listing: {}", e);
        }
    }

    let mut index = Vec::with_capacity(records.len());
    for record in records {
        write_json(&layout.record_path(&record.slug), record)?;
        index.push(IndexEntry::from(record));
        progress.inc(1);
    }
    write_json(&layout.index_json(), &index)?;
    progress.finish_and_clear();

    info!("Wrote {} article json files to {}", records.len(), out_dir.display());
    Ok(out_dir)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), BuildError> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}
