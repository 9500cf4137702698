use axum::response::Redirect;

use crate::{config, info};

/// The only scope Wallify ever asks for.
pub const OAUTH_SCOPE: &str = "user-top-read";

pub async fn login() -> Redirect {
    let auth_url = format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        scope = OAUTH_SCOPE
    );

    info!("Redirecting to Spotify authorization");
    Redirect::to(&auth_url)
}
