//! # Spotify Integration Module
//!
//! This module is the integration layer between Wallify and the Spotify Web
//! API. It handles all upstream HTTP communication: the OAuth 2.0
//! authorization-code exchanges, the paginated top-content fetcher, and the
//! profile lookup, together with the 401-triggered refresh dispatcher that
//! every authenticated route goes through.
//!
//! ## Architecture
//!
//! ```text
//! HTTP routes (api) / CLI data layer (management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (code + refresh exchanges)      auth
//!     ├── Top content (parallel paged fetch)             top
//!     ├── Profile (display name, profile picture)        profile
//!     └── Dispatcher (refresh-on-401, single retry)      with_token_refresh
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Pagination Strategy
//!
//! The top-content endpoint returns at most 50 items per request, while a
//! full grid needs up to 99. [`top::get_top_content`] splits the desired
//! range into fixed-size pages, fires all page requests concurrently, joins
//! them, and reassembles the results by page index, so completion order
//! never affects item order. Offsets beyond roughly the first hundred items
//! come back empty from Spotify, which is why assembled requests are capped
//! at [`crate::types::MAX_TOP_ITEMS`].
//!
//! ## Token Lifecycle
//!
//! Access tokens expire upstream well before the session-key TTL. Rather
//! than tracking expiry, requests are sent optimistically and a 401 response
//! triggers exactly one refresh-and-retry cycle through the token store. A
//! second consecutive 401 propagates as a failure; unbounded retry is
//! deliberately avoided so a persistently invalid session cannot hammer the
//! refresh endpoint.
//!
//! ## Error Types
//!
//! - [`RequestError`] - Session-key and upstream failures from dispatched
//!   requests
//! - `Result<_, String>` - Auth-boundary exchanges, where the message is
//!   logged and surfaced generically
//!
//! ## Related Modules
//!
//! - [`crate::management`] - The token store this layer refreshes through
//! - [`crate::api`] - HTTP routes mapping these errors onto status codes

use std::future::Future;

use reqwest::StatusCode;

use crate::{
    management::{TokenStore, TokenStoreError},
    warning,
};

pub mod auth;
pub mod profile;
pub mod top;

#[derive(Debug)]
pub enum RequestError {
    /// The session key was unknown, or refreshing its token failed.
    Session(TokenStoreError),
    /// The upstream call failed for a non-recoverable reason.
    Upstream(reqwest::Error),
}

impl From<TokenStoreError> for RequestError {
    fn from(err: TokenStoreError) -> Self {
        RequestError::Session(err)
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Upstream(err)
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Session(e) => write!(f, "{}", e),
            RequestError::Upstream(e) => write!(f, "upstream request failed: {}", e),
        }
    }
}

impl std::error::Error for RequestError {}

/// Runs an authenticated upstream operation with single-retry refresh
/// semantics.
///
/// The operation is invoked with the access token currently stored for
/// `token_key`. If it fails with HTTP 401 and no refresh has been spent on
/// this logical request yet, the store refreshes the access token and the
/// operation is retried once with the new one. Any other failure, or a 401
/// after the retry, propagates to the caller.
///
/// # Arguments
///
/// * `store` - Token store holding the session for `token_key`
/// * `token_key` - Opaque session key sent by the client
/// * `op` - The upstream call, parameterized over the access token
///
/// # Example
///
/// ```
/// let items = with_token_refresh(&store, &key, |token| {
///     top::get_top_content(token, ContentType::Artists, 99)
/// })
/// .await?;
/// ```
pub async fn with_token_refresh<T, F, Fut>(
    store: &TokenStore,
    token_key: &str,
    op: F,
) -> Result<T, RequestError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut access_token = store.lookup(token_key).await?.access_token;
    let mut refreshed = false;

    loop {
        match op(access_token.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) if err.status() == Some(StatusCode::UNAUTHORIZED) && !refreshed => {
                warning!("Access token expired, refreshing...");
                access_token = store.refresh(token_key).await?;
                refreshed = true;
            }
            Err(err) => return Err(RequestError::Upstream(err)),
        }
    }
}
