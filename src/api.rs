// API client module: a small blocking HTTP client for the blogging API.
// Only the "create photo post" call is needed; every request is signed
// with OAuth 1.0a (see `oauth`).

use crate::config::Config;
use crate::oauth::{self, Credentials, Signer};
use crate::poster::PhotoPost;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to send post request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("post rejected: {status} - {body}")]
    Status { status: StatusCode, body: String },
}

/// Blocking client holding the reqwest client, the API base URL and the
/// request signer built from the configured credentials.
#[derive(Clone)]
pub struct TumblrClient {
    client: Client,
    base_url: String,
    signer: Signer,
}

/// What the API reports back about a created post.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatedPost {
    pub id: Option<String>,
}

// Response envelope: `{"meta": {...}, "response": {"id": ..., "id_string": ...}}`.
// Both fields are optional so an unexpected 2xx body still counts as success.
#[derive(Deserialize, Debug, Default)]
struct Envelope {
    #[serde(default)]
    response: Option<PostResponse>,
}

#[derive(Deserialize, Debug, Default)]
struct PostResponse {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    id_string: Option<String>,
}

impl TumblrClient {
    /// Create a client pointed at `base_url`.
    pub fn new(base_url: impl Into<String>, creds: Credentials) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(TumblrClient {
            client,
            base_url,
            signer: Signer::new(creds),
        })
    }

    /// Create a client from the config's API URL and credential tuple.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let creds = Credentials {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.secret_key.clone(),
            token: config.token.clone(),
            token_secret: config.token_secret.clone(),
        };
        Self::new(config.api_url.clone(), creds)
    }

    /// API base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for creating a post on `blog`. The blog identifier is
    /// escaped so the signed URL is the one reqwest sends.
    pub fn post_url(&self, blog: &str) -> String {
        format!("{}/v2/blog/{}/post", &self.base_url, oauth::encode(blog))
    }

    /// Submit a photo post to `blog`. The form body carries `type=photo`,
    /// the base64 image, the tag string and the caption.
    pub fn create_photo(&self, blog: &str, post: &PhotoPost) -> Result<CreatedPost, ApiError> {
        let url = self.post_url(blog);
        let form: Vec<(String, String)> = vec![
            ("type".into(), "photo".into()),
            ("data64".into(), post.data64.clone()),
            ("tags".into(), post.tags.clone()),
            ("caption".into(), post.caption.clone()),
        ];
        let auth = self.signer.sign_request("POST", &url, &form);
        debug!(%url, bytes = post.data64.len(), "sending photo post");

        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .form(&form)
            .send()
            .map_err(ApiError::Transport)?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_else(|_| "".into());
            return Err(ApiError::Status { status, body });
        }

        let body = res.text().unwrap_or_default();
        let created = parse_created(&body);
        info!(blog, id = created.id.as_deref().unwrap_or("unknown"), "post created");
        Ok(created)
    }
}

fn parse_created(body: &str) -> CreatedPost {
    let envelope: Envelope = serde_json::from_str(body).unwrap_or_default();
    let id = envelope.response.and_then(|r| {
        r.id_string.or_else(|| {
            r.id.map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
        })
    });
    CreatedPost { id }
}
