// Poster module: turns the picked file into a photo post and submits it.

use crate::api::{ApiError, CreatedPost, TumblrClient};
use crate::config::Config;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("failed to read raw image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to post empty file {0}")]
    EmptyFile(PathBuf),

    #[error("failed post to tumblr: {0}")]
    Api(#[from] ApiError),
}

/// Form fields of one photo post.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPost {
    pub data64: String,
    pub tags: String,
    pub caption: String,
}

impl PhotoPost {
    /// Read `name` from the source directory and build its post. The
    /// caption is the file name itself.
    pub fn from_file(config: &Config, name: &str) -> Result<Self, PostError> {
        let path = config.source_file(name);
        let raw = std::fs::read(&path).map_err(|source| PostError::Read {
            path: path.clone(),
            source,
        })?;
        if raw.is_empty() {
            return Err(PostError::EmptyFile(path));
        }
        Ok(PhotoPost {
            data64: encode_image(&raw),
            tags: tags_to_string(&config.tags),
            caption: name.to_string(),
        })
    }
}

/// Standard (padded) base64 of the raw image bytes.
pub fn encode_image(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

/// Join the tags with commas, keeping their order.
pub fn tags_to_string(tags: &[String]) -> String {
    tags.join(",")
}

/// Post `name` to the configured blog.
pub fn post_image(
    config: &Config,
    client: &TumblrClient,
    name: &str,
) -> Result<CreatedPost, PostError> {
    info!(path = %config.source_file(name).display(), "posting");
    let post = PhotoPost::from_file(config, name)?;
    Ok(client.create_photo(&config.blog, &post)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(source: PathBuf, tags: &[&str]) -> Config {
        Config {
            source,
            archive: PathBuf::from("unused"),
            blog: "b".into(),
            consumer_key: "ck".into(),
            secret_key: "cs".into(),
            token: "tk".into(),
            token_secret: "ts".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            api_url: "http://localhost".into(),
        }
    }

    #[test]
    fn encode_decodes_back_to_the_same_bytes() {
        let binary: Vec<u8> = (0..=255u8).cycle().take(1031).collect();
        for raw in [&b""[..], &b"\x89PNG\r\n\x1a\n"[..], &binary[..]] {
            let decoded = STANDARD.decode(encode_image(raw)).unwrap();
            assert_eq!(decoded, raw);
        }
        assert_eq!(encode_image(b"cat"), "Y2F0");
        assert_eq!(encode_image(b""), "");
    }

    #[test]
    fn tags_are_comma_joined_in_order() {
        let tags: Vec<String> = ["zebra", "apple", "mango"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tags_to_string(&tags), "zebra,apple,mango");
        assert_eq!(tags_to_string(&[]), "");
        assert_eq!(tags_to_string(&["solo".to_string()]), "solo");
        // Tags are passed through untouched.
        assert_eq!(
            tags_to_string(&["two words".to_string(), "x".to_string()]),
            "two words,x"
        );
    }

    #[test]
    fn post_from_file_uses_name_as_caption() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cat.png"), b"meow").unwrap();
        let config = config_for(dir.path().to_path_buf(), &["cats", "pets"]);
        let post = PhotoPost::from_file(&config, "cat.png").unwrap();
        assert_eq!(
            post,
            PhotoPost {
                data64: "bWVvdw==".into(),
                tags: "cats,pets".into(),
                caption: "cat.png".into(),
            }
        );
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blank.png"), b"").unwrap();
        let config = config_for(dir.path().to_path_buf(), &[]);
        let err = PhotoPost::from_file(&config, "blank.png").unwrap_err();
        assert!(matches!(err, PostError::EmptyFile(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().to_path_buf(), &[]);
        let err = PhotoPost::from_file(&config, "gone.png").unwrap_err();
        assert!(matches!(err, PostError::Read { .. }));
    }
}
