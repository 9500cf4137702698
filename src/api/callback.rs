use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Redirect};

use crate::{api::ApiError, config, info, management::TokenStore, spotify, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(store): Extension<Arc<TokenStore>>,
) -> Result<Redirect, ApiError> {
    if let Some(error) = params.get("error") {
        warning!("Authorization denied: {}", error);
        return Err(ApiError::AuthorizationDenied(error.clone()));
    }

    let Some(code) = params.get("code") else {
        warning!("Authorization code is missing");
        return Err(ApiError::MissingCode);
    };

    let token = match spotify::auth::exchange_code(code).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return Err(ApiError::TokenExchange(e));
        }
    };

    let Some(refresh_token) = token.refresh_token else {
        warning!("Token response carried no refresh token");
        return Err(ApiError::TokenExchange(
            "missing refresh token".to_string(),
        ));
    };

    let key = store.issue(token.access_token.clone(), refresh_token).await;

    // note who just signed in; nothing is persisted
    match spotify::profile::get_profile(&token.access_token).await {
        Ok(profile) => info!(
            "Authenticated {}",
            profile.display_name.as_deref().unwrap_or("(no display name)")
        ),
        Err(e) => warning!("Could not fetch profile after login: {}", e),
    }

    Ok(Redirect::to(&format!(
        "{frontend}/?token_key={key}",
        frontend = config::frontend_url()
    )))
}
