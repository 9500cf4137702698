use std::sync::Arc;

use axum::{Extension, Json, http::HeaderMap};

use crate::{
    api::{ApiError, token_key_header},
    management::TokenStore,
    spotify,
    types::ProfileResponse,
    warning,
};

pub async fn profile(
    headers: HeaderMap,
    Extension(store): Extension<Arc<TokenStore>>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let token_key = token_key_header(&headers)?;

    let user = spotify::with_token_refresh(&store, &token_key, |token| async move {
        spotify::profile::get_profile(&token).await
    })
    .await
    .map_err(|e| {
        warning!("Error fetching user profile: {}", e);
        ApiError::from(e)
    })?;

    // users without a picture get an explicit null
    let profile_picture_url = user.images.first().map(|image| image.url.clone());

    Ok(Json(ProfileResponse {
        profile_picture_url,
    }))
}
