// Config module: reads the job's TOML file into a flat `Config` record.
// The record is loaded once per run and passed explicitly to every step.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Fixed location of the config file, relative to the working directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Used when the file does not set `TumblrApiUrl`.
pub const DEFAULT_API_URL: &str = "https://api.tumblr.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failure reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failure parsing config file: {0}")]
    Parse(String),

    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),
}

/// Paths, credentials and tags for one run. Key names follow the config
/// file (`Source`, `TumblrBlog`, ...); snake_case spellings are accepted too.
#[derive(Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(rename = "Source", alias = "source")]
    pub source: PathBuf,
    #[serde(rename = "Archive", alias = "archive")]
    pub archive: PathBuf,
    #[serde(rename = "TumblrBlog", alias = "tumblr_blog")]
    pub blog: String,
    #[serde(rename = "TumblrConsumerKey", alias = "tumblr_consumer_key")]
    pub consumer_key: String,
    #[serde(rename = "TumblrSecretKey", alias = "tumblr_secret_key")]
    pub secret_key: String,
    #[serde(rename = "TumblrToken", alias = "tumblr_token")]
    pub token: String,
    #[serde(rename = "TumblrTokenSecret", alias = "tumblr_token_secret")]
    pub token_secret: String,
    #[serde(rename = "TumblrTags", alias = "tumblr_tags", default)]
    pub tags: Vec<String>,
    #[serde(rename = "TumblrApiUrl", alias = "tumblr_api_url", default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    /// Read and decode the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), tags = config.tags.len(), "loaded config");
        Ok(config)
    }

    /// Decode config text and reject blank required fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|e| parse_error(text, &e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required: [(&'static str, bool); 8] = [
            ("Source", self.source.as_os_str().is_empty()),
            ("Archive", self.archive.as_os_str().is_empty()),
            ("TumblrBlog", self.blog.trim().is_empty()),
            ("TumblrConsumerKey", self.consumer_key.is_empty()),
            ("TumblrSecretKey", self.secret_key.is_empty()),
            ("TumblrToken", self.token.is_empty()),
            ("TumblrTokenSecret", self.token_secret.is_empty()),
            ("TumblrApiUrl", self.api_url.trim().is_empty()),
        ];
        match required.iter().find(|(_, blank)| *blank) {
            Some((name, _)) => Err(ConfigError::Empty(*name)),
            None => Ok(()),
        }
    }

    /// Path of `name` inside the source directory.
    pub fn source_file(&self, name: &str) -> PathBuf {
        self.source.join(name)
    }

    /// Path of `name` inside the archive directory.
    pub fn archive_file(&self, name: &str) -> PathBuf {
        self.archive.join(name)
    }
}

// toml's Display draws a multi-line snippet; failures are logged as one line.
fn parse_error(text: &str, err: &toml::de::Error) -> ConfigError {
    let message = err
        .message()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    match err.span() {
        Some(span) => {
            let before = text.get(..span.start).unwrap_or(text);
            let line = before.matches('\n').count() + 1;
            let column = before.rsplit('\n').next().unwrap_or("").chars().count() + 1;
            ConfigError::Parse(format!("line {line}, column {column}: {message}"))
        }
        None => ConfigError::Parse(message),
    }
}

// Credentials stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("source", &self.source)
            .field("archive", &self.archive)
            .field("blog", &self.blog)
            .field("consumer_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("token", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .field("tags", &self.tags)
            .field("api_url", &self.api_url)
            .finish()
    }
}
