//! # API Module
//!
//! This module provides the HTTP endpoints served by the Wallify server. It
//! implements the OAuth 2.0 authorization-code flow against Spotify and the
//! authenticated data routes the front-end consumes.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's authorize URL with the
//!   fixed `user-top-read` scope.
//! - [`callback`] - Receives the authorization code, exchanges it for a
//!   token pair, stores the pair in the token store, and redirects back to
//!   the front-end with the opaque session key.
//!
//! ### Data
//!
//! - [`profile`] - The authenticated user's profile picture URL.
//! - [`top_artists`] / [`top_tracks`] - The assembled top-content lists,
//!   up to 99 items.
//!
//! ### Monitoring
//!
//! - [`health`] - Health check returning application status and version.
//!
//! ## Authentication Model
//!
//! Data routes never see Spotify tokens. Clients send the opaque session
//! key in the `x-token-key` header; handlers resolve it through the token
//! store and dispatch upstream calls via
//! [`with_token_refresh`](crate::spotify::with_token_refresh), which
//! absorbs expired-access-token 401s with a single refresh-and-retry.
//!
//! ## Error Mapping
//!
//! [`ApiError`] maps the failure taxonomy onto HTTP statuses: denied or
//! malformed authorizations are 400s, unknown session keys are 401s, and
//! upstream failures are logged in detail but surfaced as generic 500s.
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Router wiring and the background sweeper
//! - [`crate::spotify`] - Upstream Spotify API integration
//! - [`crate::management`] - The session-token store

mod callback;
mod health;
mod login;
mod profile;
mod top;

pub use callback::callback;
pub use health::health;
pub use login::login;
pub use profile::profile;
pub use top::top_artists;
pub use top::top_tracks;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{management::TokenStoreError, spotify::RequestError};

#[derive(Debug)]
pub enum ApiError {
    /// The user denied the authorization request (OAuth `error` param).
    AuthorizationDenied(String),
    /// The callback arrived without a `code` parameter.
    MissingCode,
    /// The `limit` query parameter did not parse.
    InvalidLimit,
    /// The `x-token-key` header was absent, unknown, or swept.
    InvalidSessionKey,
    /// The code-for-token exchange failed.
    TokenExchange(String),
    /// Upstream call failed after any refresh retry was spent.
    Upstream(String),
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Session(TokenStoreError::NotFound) => ApiError::InvalidSessionKey,
            RequestError::Session(TokenStoreError::Refresh(e)) => ApiError::Upstream(e),
            RequestError::Upstream(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // upstream detail is logged at the call site, never sent to the
        // browser
        let (status, message) = match self {
            ApiError::AuthorizationDenied(e) => {
                (StatusCode::BAD_REQUEST, format!("Callback error: {}", e))
            }
            ApiError::MissingCode => (
                StatusCode::BAD_REQUEST,
                "Authorization code is missing".to_string(),
            ),
            ApiError::InvalidLimit => (StatusCode::BAD_REQUEST, "Invalid limit".to_string()),
            ApiError::InvalidSessionKey => (
                StatusCode::UNAUTHORIZED,
                "Token key not provided or invalid".to_string(),
            ),
            ApiError::TokenExchange(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error getting tokens".to_string(),
            ),
            ApiError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error talking to Spotify".to_string(),
            ),
        };
        (status, message).into_response()
    }
}

/// Pulls the opaque session key out of the `x-token-key` header.
pub(crate) fn token_key_header(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("x-token-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or(ApiError::InvalidSessionKey)
}
