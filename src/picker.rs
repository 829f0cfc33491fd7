// Picker module: lists the source directory and draws one entry.

use crate::config::Config;
use rand::Rng;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("cannot read directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no images left in {0}")]
    Empty(PathBuf),

    #[error("file name {0:?} is not valid UTF-8")]
    NonUtf8Name(OsString),
}

/// List every entry in `config.source` and return the name of one chosen
/// uniformly at random. Entries are not checked for being images.
pub fn pick_image<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<String, PickError> {
    let mut names = list_entries(config)?;
    if names.is_empty() {
        return Err(PickError::Empty(config.source.clone()));
    }
    // read_dir order is platform dependent; sort so a seeded rng picks the same entry.
    names.sort();

    let index = rng.gen_range(0..names.len());
    debug!(candidates = names.len(), index, "picked entry");
    let name = names.swap_remove(index);
    name.into_string().map_err(PickError::NonUtf8Name)
}

fn list_entries(config: &Config) -> Result<Vec<OsString>, PickError> {
    let io_err = |source| PickError::Io {
        path: config.source.clone(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&config.source).map_err(io_err)? {
        names.push(entry.map_err(io_err)?.file_name());
    }
    Ok(names)
}
