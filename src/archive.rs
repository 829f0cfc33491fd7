// Archive module: moves a posted file out of the source directory so it is
// never picked again.

use crate::config::Config;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive already holds {0}")]
    Exists(PathBuf),

    #[error("failed to move image {from} to archive {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rename `Source/name` to `Archive/name` and return the new path. An
/// existing archived file with the same name is never overwritten.
pub fn archive_image(config: &Config, name: &str) -> Result<PathBuf, ArchiveError> {
    let from = config.source_file(name);
    let to = config.archive_file(name);
    if to.exists() {
        return Err(ArchiveError::Exists(to));
    }
    std::fs::rename(&from, &to).map_err(|source| ArchiveError::Rename {
        from: from.clone(),
        to: to.clone(),
        source,
    })?;
    info!(from = %from.display(), to = %to.display(), "archived");
    Ok(to)
}
