use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Hard ceiling on assembled top-content items. Upstream reliably returns
/// empty pages for offsets past ~99, so no request may ask for more.
pub const MAX_TOP_ITEMS: usize = 99;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Artists,
    Tracks,
}

impl ContentType {
    /// Path segment on the Spotify API: `/me/top/{segment}`.
    pub fn api_segment(&self) -> &'static str {
        match self {
            ContentType::Artists => "artists",
            ContentType::Tracks => "tracks",
        }
    }

    /// Route on the Wallify server serving this content type.
    pub fn route(&self) -> &'static str {
        match self {
            ContentType::Artists => "top-artists",
            ContentType::Tracks => "top-tracks",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_segment())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album: AlbumRef,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// An entry of the user's top content, either an artist or a track. The two
/// shapes keep their images in different places; the accessors paper over
/// that so grid code never inspects the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    Artist(Artist),
    Track(Track),
}

impl ContentItem {
    pub fn name(&self) -> &str {
        match self {
            ContentItem::Artist(a) => &a.name,
            ContentItem::Track(t) => &t.name,
        }
    }

    /// Display image for the grid; artists carry images directly, tracks
    /// borrow their album cover.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            ContentItem::Artist(a) => a.images.first().map(|i| i.url.as_str()),
            ContentItem::Track(t) => t.album.images.first().map(|i| i.url.as_str()),
        }
    }

    pub fn external_url(&self) -> Option<&str> {
        match self {
            ContentItem::Artist(a) => a.external_urls.spotify.as_deref(),
            ContentItem::Track(t) => t.external_urls.spotify.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopItems<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(rename = "profilePictureUrl")]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridDimensions {
    pub columns: u32,
    pub rows: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridBackground {
    pub gradient: bool,
    pub color1: String,
    pub color2: String,
}

impl Default for GridBackground {
    fn default() -> Self {
        GridBackground {
            gradient: false,
            color1: "#000000".to_string(),
            color2: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfiguration {
    pub dimensions: GridDimensions,
    pub include_profile_picture: bool,
    pub exclude_imageless_items: bool,
    pub background: GridBackground,
}

impl GridConfiguration {
    pub fn total_items(&self) -> usize {
        (self.dimensions.columns as usize) * (self.dimensions.rows as usize)
    }

    /// Checks the grid dimensions against the assembled content ceiling.
    /// Runs client-side, before any network call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.dimensions.columns == 0 || self.dimensions.rows == 0 {
            return Err("Grid dimensions must be at least 1x1".to_string());
        }
        if self.total_items() > MAX_TOP_ITEMS {
            return Err(format!(
                "A {}x{} grid needs {} items, more than the {} available",
                self.dimensions.columns,
                self.dimensions.rows,
                self.total_items(),
                MAX_TOP_ITEMS
            ));
        }
        Ok(())
    }
}

#[derive(Tabled)]
pub struct ContentTableRow {
    pub position: usize,
    pub name: String,
    pub image: String,
}
