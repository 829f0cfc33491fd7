// Entrypoint for the posting job.
// - Keeps `main` small: seed the RNG and hand the fixed config path to
//   `run_from_file`.
// - Any error is logged once (messages embed their cause) and the process
//   exits 1.

use anyhow::Context;
use image_poster::{run_from_file, CONFIG_FILE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match post_one() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn post_one() -> anyhow::Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_secs();
    let mut rng = StdRng::seed_from_u64(seed);

    // Always the fixed file in the working directory; there is no override.
    let outcome = run_from_file(Path::new(CONFIG_FILE), &mut rng)?;
    debug!(?outcome, "run finished");
    Ok(())
}
