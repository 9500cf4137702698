use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use reqwest::Client;

use crate::{
    types::{ContentItem, ContentType, GridConfiguration, MAX_TOP_ITEMS, ProfileResponse},
    utils, warning,
};

/// Attempts per fetch, counting the first one.
pub const FETCH_ATTEMPTS: u32 = 3;

/// Fixed delay between fetch attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Quiet window a submission must survive before it fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub enum ContentError {
    /// The grid configuration failed validation; nothing was fetched.
    InvalidGrid(String),
    /// The account has no listening history for this content type.
    NoContent(ContentType),
    /// The Wallify server could not be reached or answered with an error,
    /// after retries.
    Http(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::InvalidGrid(e) => write!(f, "{}", e),
            ContentError::NoContent(content) => write!(
                f,
                "No {} data available. Try again after listening to more music on Spotify.",
                content
            ),
            ContentError::Http(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ContentError {}

/// Coalesces rapid repeated submissions into the latest one.
///
/// Every call to [`settle`](Self::settle) claims a new generation and then
/// waits out the window; only the call whose generation is still current
/// afterwards reports `true`. Earlier calls resolve `false` and their
/// submissions are dropped without side effects.
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn settle(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Items chosen for a grid, plus how many were available after filtering.
/// `available < requested` is the not-enough-data condition; callers warn
/// and render the short grid rather than failing.
pub struct GridSelection {
    pub items: Vec<ContentItem>,
    pub available: usize,
}

/// Client-side data layer over a running Wallify server.
///
/// Holds one cache per content type. A cache is trusted only when it
/// contains the complete 99-item superset; anything shorter is refetched on
/// the next request so a growing listening history shows up. Grid requests
/// are sliced locally from the superset, so repeated grid tweaks cost no
/// network calls.
pub struct ContentManager {
    base_url: String,
    token_key: String,
    debouncer: Debouncer,
    artists: Option<Vec<ContentItem>>,
    tracks: Option<Vec<ContentItem>>,
    profile_picture: Option<Option<String>>,
}

impl ContentManager {
    pub fn new(base_url: String, token_key: String) -> Self {
        ContentManager {
            base_url,
            token_key,
            debouncer: Debouncer::new(DEBOUNCE_WINDOW),
            artists: None,
            tracks: None,
            profile_picture: None,
        }
    }

    fn cache(&self, content: ContentType) -> &Option<Vec<ContentItem>> {
        match content {
            ContentType::Artists => &self.artists,
            ContentType::Tracks => &self.tracks,
        }
    }

    fn cache_mut(&mut self, content: ContentType) -> &mut Option<Vec<ContentItem>> {
        match content {
            ContentType::Artists => &mut self.artists,
            ContentType::Tracks => &mut self.tracks,
        }
    }

    /// Returns the full top-content superset, from cache when complete.
    pub async fn get_superset(
        &mut self,
        content: ContentType,
    ) -> Result<Vec<ContentItem>, ContentError> {
        if let Some(cached) = self.cache(content) {
            if cached.len() == MAX_TOP_ITEMS {
                return Ok(cached.clone());
            }
        }

        let fetched = self.fetch_superset(content).await?;
        *self.cache_mut(content) = Some(fetched.clone());
        Ok(fetched)
    }

    async fn fetch_superset(&self, content: ContentType) -> Result<Vec<ContentItem>, ContentError> {
        let url = format!(
            "{base}/{route}?limit={limit}",
            base = self.base_url,
            route = content.route(),
            limit = MAX_TOP_ITEMS
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_fetch(&url).await {
                Ok(items) => return Ok(items),
                Err(e) if attempt < FETCH_ATTEMPTS => {
                    warning!(
                        "Fetching top {} failed (attempt {}): {}",
                        content,
                        attempt,
                        e
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(ContentError::Http(e)),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<ContentItem>, String> {
        let client = Client::new();
        let response = client
            .get(url)
            .header("x-token-key", &self.token_key)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        response
            .json::<Vec<ContentItem>>()
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns the user's profile-picture URL, cached for the session.
    /// Users without a picture resolve to `Ok(None)` and are cached too.
    pub async fn profile_picture(&mut self) -> Result<Option<String>, ContentError> {
        if let Some(cached) = &self.profile_picture {
            return Ok(cached.clone());
        }

        let url = format!("{base}/profile", base = self.base_url);

        let mut attempt = 0;
        let profile = loop {
            attempt += 1;
            match self.try_fetch_profile(&url).await {
                Ok(profile) => break profile,
                Err(e) if attempt < FETCH_ATTEMPTS => {
                    warning!("Fetching profile failed (attempt {}): {}", attempt, e);
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(ContentError::Http(e)),
            }
        };

        self.profile_picture = Some(profile.profile_picture_url.clone());
        Ok(profile.profile_picture_url)
    }

    async fn try_fetch_profile(&self, url: &str) -> Result<ProfileResponse, String> {
        let client = Client::new();
        let response = client
            .get(url)
            .header("x-token-key", &self.token_key)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        response
            .json::<ProfileResponse>()
            .await
            .map_err(|e| e.to_string())
    }

    /// Resolves a grid submission into the items to render.
    ///
    /// Validation runs first and rejects oversized grids before any network
    /// traffic. The submission then has to survive the debounce window;
    /// submissions superseded inside the window resolve to `Ok(None)`.
    /// Afterwards the superset is sliced (and optionally filtered for
    /// imageless entries) down to `columns x rows` items.
    pub async fn grid_content(
        &mut self,
        config: &GridConfiguration,
        content: ContentType,
    ) -> Result<Option<GridSelection>, ContentError> {
        config.validate().map_err(ContentError::InvalidGrid)?;

        if !self.debouncer.settle().await {
            return Ok(None);
        }

        let mut items = self.get_superset(content).await?;
        if items.is_empty() {
            return Err(ContentError::NoContent(content));
        }

        if config.exclude_imageless_items {
            items = utils::filter_imageless(items);
        }

        let available = items.len();
        items.truncate(config.total_items());

        Ok(Some(GridSelection { items, available }))
    }
}
