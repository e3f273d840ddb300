//! # cdn_signer
//!
//! A Rust library for generating signed CDN resource URLs.
//!
//! The token is an MD5 secure link: the edge server rebuilds the same token
//! key from the request and rejects the URL when the hashes differ, when the
//! link has expired, or when the client address does not match.
//!
//! ## Quick Start
//!
//! ```rust
//! use cdn_signer::SigningRequest;
//!
//! let signed = SigningRequest::new("example.com", "123abc")
//!     .with_path("images/photo.png")
//!     .with_expiry(1546300800)
//!     .with_client_ip("1.3.2.2")
//!     .sign()
//!     .unwrap();
//!
//! assert_eq!(
//!     signed.to_url(),
//!     "http://example.com/images/photo.png?secure=13UShqpVn0pkzv_f7UzLLg&expires=1546300800&ip=1.3.2.2"
//! );
//!
//! // Or place the token in front of the path
//! assert_eq!(
//!     signed.path_based().to_url(),
//!     "http://example.com/secure=13UShqpVn0pkzv_f7UzLLg&expires=1546300800&ip=1.3.2.2/images/photo.png"
//! );
//! ```
//!
//! ## URL Formats
//!
//! - **Querystring** (default): `<scheme>://<host><path>?secure=<token>&expires=<ts>&ip=<ip>`
//! - **Path**: `<scheme>://<host>/secure=<token>&expires=<ts>&ip=<ip><path>`
//!
//! For HLS, sign the playlist directory rather than the `.m3u8` file so the
//! same token also covers every segment below it.

mod error;
mod utils;

#[cfg(feature = "server")]
pub mod server;

use std::{convert::Infallible, fmt, str::FromStr};

pub use error::{MissingField, Result, SignError};
pub use utils::crypto::{generate_token, token_key};
pub use utils::encoding::{encode_token, normalize_path, strip_query};

/// Placement of the token within the signed URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Token, expiry and IP appended as query parameters (default)
    #[default]
    Querystring,
    /// Token, expiry and IP inserted as the first path segment
    Path,
}

impl From<&str> for Format {
    /// Only the exact value `"path"` selects [`Format::Path`]; anything else
    /// falls back to [`Format::Querystring`].
    fn from(value: &str) -> Self {
        match value {
            "path" => Format::Path,
            _ => Format::Querystring,
        }
    }
}

impl FromStr for Format {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Format::from(s))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Querystring => f.write_str("querystring"),
            Format::Path => f.write_str("path"),
        }
    }
}

/// A signed CDN URL ready for use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    /// URL scheme, e.g. `http`
    pub scheme: String,
    /// Hostname with any query string removed
    pub hostname: String,
    /// Rooted resource path with any query string removed
    pub path: String,
    /// URL-safe MD5 token, without the `secure=` prefix
    pub token: String,
    /// Expiry timestamp, if the link expires
    pub expires: Option<String>,
    /// Client IP, if the link is restricted to one
    pub client_ip: Option<String>,
    /// Layout used by [`SignedUrl::to_url`]
    pub format: Format,
}

impl SignedUrl {
    /// The `secure=<token>&expires=<ts>&ip=<ip>` fragment
    pub fn token_fragment(&self) -> String {
        let mut fragment = format!("secure={}", self.token);
        if let Some(expires) = &self.expires {
            fragment.push_str("&expires=");
            fragment.push_str(expires);
        }
        if let Some(ip) = &self.client_ip {
            fragment.push_str("&ip=");
            fragment.push_str(ip);
        }
        fragment
    }

    /// Generate the full signed URL in the configured format
    pub fn to_url(&self) -> String {
        match self.format {
            Format::Path => format!(
                "{}://{}/{}{}",
                self.scheme,
                self.hostname,
                self.token_fragment(),
                self.path
            ),
            Format::Querystring => format!(
                "{}://{}{}?{}",
                self.scheme,
                self.hostname,
                self.path,
                self.token_fragment()
            ),
        }
    }

    /// Switch to the path-based layout
    pub fn path_based(mut self) -> Self {
        self.format = Format::Path;
        self
    }

    /// Switch to the querystring layout
    pub fn querystring(mut self) -> Self {
        self.format = Format::Querystring;
        self
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// Inputs for one signed URL
///
/// Only the hostname and the signing key are required. Everything else has
/// a default: querystring format, `http` scheme, path `/`, no expiry and no
/// client IP restriction.
///
/// # Example
///
/// ```rust
/// use cdn_signer::{Format, SigningRequest};
///
/// let url = SigningRequest::new("cdn.example.com", "secret")
///     .with_scheme("https")
///     .with_format(Format::Path)
///     .with_path("/videos/")
///     .sign()
///     .unwrap()
///     .to_url();
///
/// assert!(url.starts_with("https://cdn.example.com/secure="));
/// assert!(url.ends_with("/videos/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    format: Format,
    scheme: String,
    hostname: String,
    path: String,
    secret_key: String,
    expires: Option<String>,
    client_ip: Option<String>,
}

impl SigningRequest {
    /// Create a request for `hostname` signed with `secret_key`
    pub fn new(hostname: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            format: Format::default(),
            scheme: "http".to_string(),
            hostname: hostname.into(),
            path: "/".to_string(),
            secret_key: secret_key.into(),
            expires: None,
            client_ip: None,
        }
    }

    /// Choose between querystring and path-based token placement
    pub fn with_format(mut self, format: impl Into<Format>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the URL scheme, `http` by default
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the resource path covered by the token.
    ///
    /// A missing leading `/` is added and any query string is ignored.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the UNIX timestamp after which the link stops working.
    ///
    /// The value is used verbatim; an empty string means no expiry.
    pub fn with_expiry(mut self, expires: impl ToString) -> Self {
        self.expires = Some(expires.to_string());
        self
    }

    /// Restrict the link to one client address. An empty string means unrestricted.
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    /// Validate, normalize and sign the request
    pub fn sign(&self) -> Result<SignedUrl> {
        sign(self)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Sign a request, returning either the signed URL or every missing field
///
/// # Example
///
/// ```rust
/// use cdn_signer::{sign, SigningRequest};
///
/// let err = sign(&SigningRequest::new("", "")).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "URL Signing Key not given. Resource hostname not given. "
/// );
/// ```
pub fn sign(request: &SigningRequest) -> Result<SignedUrl> {
    let mut missing = Vec::new();
    if request.secret_key.is_empty() {
        missing.push(MissingField::SigningKey);
    }
    if request.hostname.is_empty() {
        missing.push(MissingField::Hostname);
    }
    if !missing.is_empty() {
        return Err(SignError::MissingFields(missing));
    }

    let path = normalize_path(&request.path);
    let hostname = strip_query(&request.hostname).to_string();
    let expires = non_empty(&request.expires);
    let client_ip = non_empty(&request.client_ip);

    let key = token_key(
        expires.as_deref().unwrap_or_default(),
        &path,
        &request.secret_key,
        client_ip.as_deref().unwrap_or_default(),
    );

    Ok(SignedUrl {
        scheme: request.scheme.clone(),
        hostname,
        path,
        token: generate_token(&key),
        expires,
        client_ip,
        format: request.format,
    })
}

/// Sign a resource and render the URL in one call
///
/// Empty `expires` or `client_ip` mean no expiry and no IP restriction.
///
/// # Example
///
/// ```rust
/// let url = cdn_signer::sign_url("querystring", "http", "example.com", "/", "123abc", "", "").unwrap();
/// assert_eq!(url, "http://example.com/?secure=mMLZ7RdvCaiFIYVvCdlQpQ");
/// ```
pub fn sign_url(
    format: &str,
    scheme: &str,
    hostname: &str,
    path: &str,
    secret_key: &str,
    expires: &str,
    client_ip: &str,
) -> Result<String> {
    SigningRequest::new(hostname, secret_key)
        .with_format(format)
        .with_scheme(scheme)
        .with_path(path)
        .with_expiry(expires)
        .with_client_ip(client_ip)
        .sign()
        .map(|signed| signed.to_url())
}
