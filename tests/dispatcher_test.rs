use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Extension, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;

use wallify::management::TokenStore;
use wallify::spotify::{self, RequestError};
use wallify::types::ContentType;

// The stub account has 75 top artists; requests past that return empty
const CATALOG_SIZE: usize = 75;
const FRESH_TOKEN: &str = "fresh-token";

#[derive(Default)]
struct StubCounters {
    artist_requests: AtomicUsize,
    track_requests: AtomicUsize,
    refresh_requests: AtomicUsize,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers.get("authorization").and_then(|v| v.to_str().ok())
}

fn artist_json(i: usize) -> serde_json::Value {
    json!({
        "id": format!("artist-{i}"),
        "name": format!("Artist {i}"),
        "genres": ["synthwave"],
        "images": [{"url": format!("https://img.test/{i}"), "height": 300, "width": 300}],
        "external_urls": {"spotify": format!("https://open.spotify.com/artist/artist-{i}")}
    })
}

// Serves /me/top/artists: 401 for anything but the fresh token, otherwise
// the requested window of the catalog
async fn top_artists_stub(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Extension(counters): Extension<Arc<StubCounters>>,
) -> Response {
    counters.artist_requests.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {}", FRESH_TOKEN);
    if bearer(&headers) != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(20);
    let offset: usize = params
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let end = (offset + limit).min(CATALOG_SIZE);
    let items: Vec<serde_json::Value> = (offset.min(end)..end).map(artist_json).collect();

    Json(json!({ "items": items, "total": CATALOG_SIZE })).into_response()
}

// Serves /me/top/tracks: rejects every token, modelling a session whose
// refreshes never produce an acceptable access token
async fn top_tracks_stub(Extension(counters): Extension<Arc<StubCounters>>) -> StatusCode {
    counters.track_requests.fetch_add(1, Ordering::SeqCst);
    StatusCode::UNAUTHORIZED
}

async fn token_stub(Extension(counters): Extension<Arc<StubCounters>>) -> Json<serde_json::Value> {
    counters.refresh_requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "access_token": FRESH_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

// The scenarios share one stub server and run sequentially in a single
// test, because the upstream URLs travel through process-wide environment
// variables.
#[tokio::test]
async fn test_dispatcher_refresh_semantics() {
    let counters = Arc::new(StubCounters::default());

    let app = Router::new()
        .route("/me/top/artists", get(top_artists_stub))
        .route("/me/top/tracks", get(top_tracks_stub))
        .route("/api/token", post(token_stub))
        .layer(Extension(Arc::clone(&counters)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    unsafe {
        std::env::set_var("SPOTIFY_API_URL", format!("http://{}", addr));
        std::env::set_var("SPOTIFY_API_TOKEN_URL", format!("http://{}/api/token", addr));
        std::env::set_var("SPOTIFY_API_AUTH_CLIENT_ID", "test-client-id");
        std::env::set_var("SPOTIFY_API_AUTH_CLIENT_SECRET", "test-client-secret");
    }

    let store = TokenStore::new();

    // A valid access token goes straight through, with no refresh
    let valid_key = store
        .issue(FRESH_TOKEN.to_string(), "refresh-a".to_string())
        .await;

    let items = spotify::with_token_refresh(&store, &valid_key, |token| {
        spotify::top::get_top_content(token, ContentType::Artists, 60)
    })
    .await
    .unwrap();

    assert_eq!(items.len(), 60);
    // Pages are reassembled by index, not completion order
    assert_eq!(items[0].name(), "Artist 0");
    assert_eq!(items[49].name(), "Artist 49");
    assert_eq!(items[50].name(), "Artist 50");
    assert_eq!(items[59].name(), "Artist 59");
    assert_eq!(counters.refresh_requests.load(Ordering::SeqCst), 0);
    assert_eq!(counters.artist_requests.load(Ordering::SeqCst), 2);

    // An expired access token gets exactly one refresh, invisible to the
    // caller
    let stale_key = store
        .issue("stale-token".to_string(), "refresh-b".to_string())
        .await;
    let artist_requests_before = counters.artist_requests.load(Ordering::SeqCst);

    let items = spotify::with_token_refresh(&store, &stale_key, |token| {
        spotify::top::get_top_content(token, ContentType::Artists, 10)
    })
    .await
    .unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(counters.refresh_requests.load(Ordering::SeqCst), 1);
    // One 401 attempt plus one successful retry
    assert_eq!(
        counters.artist_requests.load(Ordering::SeqCst) - artist_requests_before,
        2
    );

    // The store now holds the refreshed access token under the same key,
    // with the refresh token untouched
    let session = store.lookup(&stale_key).await.unwrap();
    assert_eq!(session.access_token, FRESH_TOKEN);
    assert_eq!(session.refresh_token, "refresh-b");

    // A second consecutive 401 propagates as a failure with no further
    // refresh attempts
    let doomed_key = store
        .issue("stale-token".to_string(), "refresh-c".to_string())
        .await;
    let refreshes_before = counters.refresh_requests.load(Ordering::SeqCst);

    let result = spotify::with_token_refresh(&store, &doomed_key, |token| {
        spotify::top::get_top_content(token, ContentType::Tracks, 10)
    })
    .await;

    match result {
        Err(RequestError::Upstream(e)) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        }
        other => panic!("expected an upstream 401, got {:?}", other),
    }
    assert_eq!(
        counters.refresh_requests.load(Ordering::SeqCst) - refreshes_before,
        1
    );
    // Exactly two attempts hit the tracks route: the original and the
    // single post-refresh retry
    assert_eq!(counters.track_requests.load(Ordering::SeqCst), 2);

    // Asking for the full ceiling on an account with only 75 items yields
    // the short list, in order, with no error
    let items = spotify::with_token_refresh(&store, &valid_key, |token| {
        spotify::top::get_top_content(token, ContentType::Artists, 99)
    })
    .await
    .unwrap();

    assert_eq!(items.len(), CATALOG_SIZE);
    assert_eq!(items[0].name(), "Artist 0");
    assert_eq!(items[74].name(), "Artist 74");
}
