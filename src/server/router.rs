use crate::{Format, SignError, SigningRequest};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub key: String,
}

impl AppState {
    pub fn new(key: impl Into<String>) -> Self {
        AppState { key: key.into() }
    }
}

/// Query parameters of `GET /sign`, named after the CLI flags
#[derive(Debug, Default, Deserialize)]
pub struct SignParams {
    #[serde(default)]
    pub resource: String,
    pub path: Option<String>,
    pub format: Option<String>,
    pub scheme: Option<String>,
    pub expires: Option<String>,
    pub ip: Option<String>,
}

impl SignParams {
    fn to_request(&self, key: &str) -> SigningRequest {
        let mut request = SigningRequest::new(self.resource.as_str(), key)
            .with_format(Format::from(self.format.as_deref().unwrap_or_default()));
        if let Some(scheme) = &self.scheme {
            request = request.with_scheme(scheme.as_str());
        }
        if let Some(path) = &self.path {
            request = request.with_path(path.as_str());
        }
        if let Some(expires) = &self.expires {
            request = request.with_expiry(expires);
        }
        if let Some(ip) = &self.ip {
            request = request.with_client_ip(ip.as_str());
        }
        request
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/favicon.ico", get(favicon))
        .route("/sign", get(sign_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn sign_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SignParams>,
) -> Result<Response, SignError> {
    let signed = params.to_request(&state.key).sign()?;
    debug!(hostname = %signed.hostname, path = %signed.path, format = %signed.format, "signed url");
    Ok(signed.to_url().into_response())
}
