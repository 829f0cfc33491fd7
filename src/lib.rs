// Library root
// -----------
// This crate exposes the pieces of the posting job as a library. The
// binary (`main.rs`) loads the config, seeds the RNG and calls `run`.
//
// Module responsibilities:
// - `config`: Reads `config.toml` into a `Config` record.
// - `picker`: Lists the source directory and picks one entry at random.
// - `poster`: Reads and base64-encodes the picked file and submits it.
// - `api`: Blocking HTTP client for the blogging API (create photo post).
// - `oauth`: OAuth 1.0a signing for the API requests.
// - `archive`: Moves a posted file into the archive directory.
// - `run`: Wires the steps together and maps failures to `RunError`.
pub mod api;
pub mod archive;
pub mod config;
pub mod oauth;
pub mod picker;
pub mod poster;
pub mod run;

pub use config::{Config, CONFIG_FILE};
pub use run::{run, run_from_file, Outcome, RunError};
