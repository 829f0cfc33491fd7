// OAuth module: OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
// The blogging API authenticates every write with a consumer key/secret
// pair plus an access token/secret pair. Each request carries an
// `Authorization: OAuth ...` header whose signature covers the method,
// the URL without query, and every protocol and body parameter.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

/// RFC 3986 unreserved characters are left as-is, everything else is escaped.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

/// The four-part credential tuple.
#[derive(Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

/// Percent-encode `s` with the RFC 3986 unreserved set.
pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, RFC3986).to_string()
}

/// Build the signature base string: `METHOD&enc(url)&enc(sorted params)`.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    pairs.sort();
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&joined)
    )
}

/// HMAC-SHA1 over `base` keyed with `enc(consumer_secret)&enc(token_secret)`,
/// returned as standard base64.
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    // HMAC accepts keys of any length.
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .unwrap_or_else(|_| unreachable!("hmac key length is unrestricted"));
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Compute the `Authorization` header value for a request. `params` holds
/// the form body (and query) parameters that are part of the signature.
pub fn authorization_header(
    method: &str,
    url: &str,
    params: &[(String, String)],
    creds: &Credentials,
    nonce: &str,
    timestamp: u64,
) -> String {
    let mut oauth: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), creds.consumer_key.clone()),
        ("oauth_nonce".into(), nonce.to_string()),
        ("oauth_signature_method".into(), SIGNATURE_METHOD.into()),
        ("oauth_timestamp".into(), timestamp.to_string()),
        ("oauth_token".into(), creds.token.clone()),
        ("oauth_version".into(), VERSION.into()),
    ];

    let mut all = oauth.clone();
    all.extend(params.iter().cloned());
    let base = signature_base_string(method, url, &all);
    let signature = sign(&base, &creds.consumer_secret, &creds.token_secret);
    oauth.push(("oauth_signature".into(), signature));

    let fields = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

/// Signs requests with a fresh nonce and the current time.
#[derive(Clone)]
pub struct Signer {
    creds: Credentials,
}

impl Signer {
    /// Create a signer for one credential tuple.
    pub fn new(creds: Credentials) -> Self {
        Signer { creds }
    }

    /// `Authorization` header value for a request, with a random nonce and
    /// the current unix time.
    pub fn sign_request(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        authorization_header(method, url, params, &self.creds, &nonce, timestamp)
    }
}
