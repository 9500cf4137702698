use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{info, spotify, types::SessionToken, utils};

/// Session entries older than this are dropped by the sweeper.
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// How often the background sweeper runs.
pub const SWEEP_INTERVAL_SECS: u64 = 60 * 60;

#[derive(Debug)]
pub enum TokenStoreError {
    /// The session key is unknown or has been swept.
    NotFound,
    /// The upstream token endpoint rejected the refresh exchange.
    Refresh(String),
}

impl std::fmt::Display for TokenStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStoreError::NotFound => write!(f, "invalid or expired session key"),
            TokenStoreError::Refresh(e) => write!(f, "token refresh failed: {}", e),
        }
    }
}

impl std::error::Error for TokenStoreError {}

/// Process-wide mapping from opaque session keys to Spotify token pairs.
///
/// The browser only ever sees the session key; access and refresh tokens
/// stay on the server. Entries live in memory for at most
/// [`TOKEN_TTL_SECS`] and do not survive a restart.
pub struct TokenStore {
    tokens: Mutex<HashMap<String, SessionToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a freshly exchanged token pair and returns the session key
    /// that maps to it. The key is regenerated until it collides with no
    /// live entry.
    pub async fn issue(&self, access_token: String, refresh_token: String) -> String {
        self.issue_at(access_token, refresh_token, Utc::now().timestamp() as u64)
            .await
    }

    /// Timestamp-explicit form of [`issue`](Self::issue).
    pub async fn issue_at(
        &self,
        access_token: String,
        refresh_token: String,
        issued_at: u64,
    ) -> String {
        let mut tokens = self.tokens.lock().await;

        let mut key = utils::generate_session_key();
        while tokens.contains_key(&key) {
            key = utils::generate_session_key();
        }

        tokens.insert(
            key.clone(),
            SessionToken {
                access_token,
                refresh_token,
                issued_at,
            },
        );
        key
    }

    pub async fn lookup(&self, key: &str) -> Result<SessionToken, TokenStoreError> {
        let tokens = self.tokens.lock().await;
        tokens.get(key).cloned().ok_or(TokenStoreError::NotFound)
    }

    /// Exchanges the stored refresh token for a new access token and swaps
    /// it in under the same key. The refresh token and the key itself are
    /// left untouched; the issue timestamp is re-stamped so an active
    /// session is not swept out from under the user.
    ///
    /// Concurrent refreshes of the same key are not coordinated; the last
    /// writer wins.
    pub async fn refresh(&self, key: &str) -> Result<String, TokenStoreError> {
        let refresh_token = self.lookup(key).await?.refresh_token;

        // the lock is not held across the upstream round-trip
        let new_access_token = spotify::auth::refresh_access_token(&refresh_token)
            .await
            .map_err(TokenStoreError::Refresh)?;

        let mut tokens = self.tokens.lock().await;
        let entry = tokens.get_mut(key).ok_or(TokenStoreError::NotFound)?;
        entry.access_token = new_access_token.clone();
        entry.issued_at = Utc::now().timestamp() as u64;

        Ok(new_access_token)
    }

    /// Removes every entry older than [`TOKEN_TTL_SECS`] and returns how
    /// many were dropped. Entries younger than the TTL are never touched,
    /// however often this runs.
    pub async fn sweep(&self) -> usize {
        let now = Utc::now().timestamp() as u64;
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|_, token| now.saturating_sub(token.issued_at) <= TOKEN_TTL_SECS);
        before - tokens.len()
    }

    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the hourly sweep task for the lifetime of the process.
pub fn spawn_sweeper(store: Arc<TokenStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        // the first tick fires immediately; skip it so a fresh server
        // doesn't log a no-op sweep
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = store.sweep().await;
            if removed > 0 {
                info!("Removed {} expired session keys", removed);
            }
        }
    });
}
