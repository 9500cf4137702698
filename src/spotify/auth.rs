use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{config, types::TokenResponse};

/// Builds the HTTP Basic authorization header from the configured client
/// id and secret, as the token endpoint expects for a confidential client.
fn basic_auth_header() -> String {
    let credentials = format!(
        "{}:{}",
        config::spotify_client_id(),
        config::spotify_client_secret()
    );
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// Completes the OAuth 2.0 authorization-code flow: the code received on
/// the callback route is posted to the token endpoint together with the
/// registered redirect URI and the Basic credentials.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(TokenResponse)` - Access token, refresh token, and metadata
/// - `Err(String)` - Error message describing the failure
///
/// # Error Conditions
///
/// Common failures include:
/// - Invalid or expired authorization code (codes are single-use and
///   short-lived)
/// - Redirect URI not matching the one registered with Spotify
/// - Network connectivity issues
pub async fn exchange_code(code: &str) -> Result<TokenResponse, String> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .header("Authorization", basic_auth_header())
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config::spotify_redirect_uri()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(format!("token endpoint returned {}: {}", status, body));
    }

    res.json::<TokenResponse>().await.map_err(|e| e.to_string())
}

/// Exchanges a refresh token for a new access token.
///
/// Called by the token store when an upstream request comes back 401. Only
/// the new access token is returned; Wallify keeps using the refresh token
/// it already holds.
///
/// # Arguments
///
/// * `refresh_token` - Valid refresh token obtained from the original
///   authorization-code exchange
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The fresh access token
/// - `Err(String)` - Error message describing the failure
///
/// # Error Conditions
///
/// - Network connectivity issues
/// - Invalid or revoked refresh token
/// - A token-endpoint response with no `access_token` field
pub async fn refresh_access_token(refresh_token: &str) -> Result<String, String> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .header("Authorization", basic_auth_header())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

    match json["access_token"].as_str() {
        Some(access_token) => Ok(access_token.to_string()),
        None => Err("refresh response missing access token".to_string()),
    }
}
