// Run module: the job itself. Pick, post, archive, strictly in order. The
// first failure stops the run; anything already done (a created post) is
// not undone.

use crate::api::{ApiError, CreatedPost, TumblrClient};
use crate::archive::{self, ArchiveError};
use crate::config::{Config, ConfigError};
use crate::picker::{self, PickError};
use crate::poster::{self, PostError};
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Every way a run can fail, one variant per step.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to set up API client: {0}")]
    Client(#[source] ApiError),

    #[error(transparent)]
    Pick(#[from] PickError),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub image: String,
    pub post: CreatedPost,
    pub archived_to: PathBuf,
}

pub fn run<R: Rng + ?Sized>(
    config: &Config,
    rng: &mut R,
    client: &TumblrClient,
) -> Result<Outcome, RunError> {
    let image = picker::pick_image(config, rng)?;
    let post = poster::post_image(config, client, &image)?;
    let archived_to = archive::archive_image(config, &image)?;
    info!(%image, "done");
    Ok(Outcome {
        image,
        post,
        archived_to,
    })
}

/// Load the config at `path`, build the API client from it and run once.
pub fn run_from_file<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<Outcome, RunError> {
    let config = Config::load(path)?;
    let client = TumblrClient::from_config(&config).map_err(RunError::Client)?;
    run(&config, rng, &client)
}
