use rand::{Rng, distr::Alphanumeric};

use crate::types::{ContentItem, ContentType};

/// Generates a random opaque session key. Uniqueness against live keys is
/// the token store's job; this only provides the raw material.
pub fn generate_session_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Clap value parser for the `--type` flag.
pub fn parse_content_type(s: &str) -> Result<ContentType, String> {
    match s.to_lowercase().as_str() {
        "artists" | "artist" => Ok(ContentType::Artists),
        "tracks" | "track" => Ok(ContentType::Tracks),
        other => Err(format!(
            "unknown content type '{}', expected 'artists' or 'tracks'",
            other
        )),
    }
}

/// Drops items that have no usable display image, mirroring the grid option
/// that skips blank tiles.
pub fn filter_imageless(items: Vec<ContentItem>) -> Vec<ContentItem> {
    items
        .into_iter()
        .filter(|item| item.image_url().is_some_and(|url| !url.is_empty()))
        .collect()
}
