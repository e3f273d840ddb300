use std::fmt;

/// A required signing input that was not supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// The URL signing key
    SigningKey,
    /// The CDN resource hostname
    Hostname,
}

impl MissingField {
    pub fn message(&self) -> &'static str {
        match self {
            MissingField::SigningKey => "URL Signing Key not given. ",
            MissingField::Hostname => "Resource hostname not given. ",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Why a request could not be signed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// Every missing field, signing key first
    #[error("{}", join_messages(.0))]
    MissingFields(Vec<MissingField>),
}

impl SignError {
    pub fn missing_fields(&self) -> &[MissingField] {
        match self {
            SignError::MissingFields(fields) => fields,
        }
    }
}

fn join_messages(fields: &[MissingField]) -> String {
    fields.iter().map(MissingField::message).collect()
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for SignError {
    fn into_response(self) -> axum::response::Response {
        (axum::http::StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SignError>;
