use reqwest::Client;

use crate::{config, types::UserProfile};

/// Fetches the authenticated user's profile from `/me`.
///
/// Used for the profile-picture route and to log who just completed the
/// OAuth flow. A 401 here is recoverable; callers go through
/// [`with_token_refresh`](crate::spotify::with_token_refresh).
pub async fn get_profile(token: &str) -> Result<UserProfile, reqwest::Error> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    response.json::<UserProfile>().await
}
