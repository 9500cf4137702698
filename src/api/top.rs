use std::{collections::HashMap, sync::Arc};

use axum::{Extension, Json, extract::Query, http::HeaderMap};

use crate::{
    api::{ApiError, token_key_header},
    info,
    management::TokenStore,
    spotify,
    types::{ContentItem, ContentType, MAX_TOP_ITEMS},
    warning,
};

const DEFAULT_LIMIT: usize = 50;

pub async fn top_artists(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Extension(store): Extension<Arc<TokenStore>>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    top_content(ContentType::Artists, headers, params, store).await
}

pub async fn top_tracks(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Extension(store): Extension<Arc<TokenStore>>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    top_content(ContentType::Tracks, headers, params, store).await
}

async fn top_content(
    content: ContentType,
    headers: HeaderMap,
    params: HashMap<String, String>,
    store: Arc<TokenStore>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    let token_key = token_key_header(&headers)?;

    let limit = match params.get("limit") {
        Some(raw) => raw.parse::<usize>().map_err(|_| ApiError::InvalidLimit)?,
        None => DEFAULT_LIMIT,
    };
    let total = limit.min(MAX_TOP_ITEMS);

    info!("GET /{route} limit={total}", route = content.route());

    let items = spotify::with_token_refresh(&store, &token_key, |token| {
        spotify::top::get_top_content(token, content, total)
    })
    .await
    .map_err(|e| {
        warning!("Error fetching top {}: {}", content, e);
        ApiError::from(e)
    })?;

    Ok(Json(items))
}
