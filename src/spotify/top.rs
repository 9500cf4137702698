use futures::future::try_join_all;
use reqwest::Client;

use crate::{
    config,
    types::{Artist, ContentItem, ContentType, MAX_TOP_ITEMS, TopItems, Track},
};

/// Spotify's per-request page limit on the top-content endpoint.
pub const PAGE_LIMIT: usize = 50;

/// Retrieves one page of the user's top artists or tracks.
///
/// Issues a single `/me/top/{type}` request with the given window and maps
/// the raw items into [`ContentItem`] variants so callers never deal with
/// the two response shapes directly.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `content` - Which top-content category to fetch
/// * `offset` - Index of the first item of the page
/// * `limit` - Page size, at most [`PAGE_LIMIT`]
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<ContentItem>)` - The page's items in ranking order
/// - `Err(reqwest::Error)` - Network error or non-success HTTP status
///
/// A 401 is surfaced as an error carrying the status so the dispatcher can
/// decide to refresh and retry.
pub async fn get_top_page(
    token: &str,
    content: ContentType,
    offset: usize,
    limit: usize,
) -> Result<Vec<ContentItem>, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/top/{segment}?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        segment = content.api_segment(),
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    match content {
        ContentType::Artists => {
            let page = response.json::<TopItems<Artist>>().await?;
            Ok(page.items.into_iter().map(ContentItem::Artist).collect())
        }
        ContentType::Tracks => {
            let page = response.json::<TopItems<Track>>().await?;
            Ok(page.items.into_iter().map(ContentItem::Track).collect())
        }
    }
}

/// Partitions `[0, total)` into `(offset, limit)` pages of [`PAGE_LIMIT`].
/// The total is capped at [`MAX_TOP_ITEMS`]; offsets past that point return
/// empty pages upstream.
pub fn page_plan(total: usize) -> Vec<(usize, usize)> {
    let total = total.min(MAX_TOP_ITEMS);
    let mut pages = Vec::new();
    let mut offset = 0;
    while offset < total {
        pages.push((offset, PAGE_LIMIT.min(total - offset)));
        offset += PAGE_LIMIT;
    }
    pages
}

/// Reassembles fetched pages in page order and truncates to the requested
/// count. Completion order of the underlying requests is irrelevant here;
/// ordering comes from the page index alone.
pub fn concat_pages(pages: Vec<Vec<ContentItem>>, total: usize) -> Vec<ContentItem> {
    let mut items: Vec<ContentItem> = pages.into_iter().flatten().collect();
    items.truncate(total);
    items
}

/// Assembles up to `total` top items by fetching all pages concurrently.
///
/// One request is issued per page and all of them are joined; a single
/// failed page fails the whole call. A user with less listening history
/// than `total` gets a short list back, which callers surface as a
/// not-enough-data condition rather than an error.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `content` - Which top-content category to fetch
/// * `total` - Desired item count, capped at [`MAX_TOP_ITEMS`]
///
/// # Example
///
/// ```
/// let items = get_top_content(token, ContentType::Artists, 99).await?;
/// assert!(items.len() <= 99);
/// ```
pub async fn get_top_content(
    token: String,
    content: ContentType,
    total: usize,
) -> Result<Vec<ContentItem>, reqwest::Error> {
    let pages = try_join_all(
        page_plan(total)
            .into_iter()
            .map(|(offset, limit)| get_top_page(&token, content, offset, limit)),
    )
    .await?;

    Ok(concat_pages(pages, total))
}
