use axum::{
    Extension, Router,
    http::{HeaderName, Method, header},
    routing::get,
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use crate::{api, config, error, info, management};

pub async fn start_api_server() {
    let store = Arc::new(management::TokenStore::new());
    management::spawn_sweeper(Arc::clone(&store));

    // the browser front-end lives on another origin and sends the session
    // key as a custom header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-token-key"),
        ]);

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/profile", get(api::profile))
        .route("/top-artists", get(api::top_artists))
        .route("/top-tracks", get(api::top_tracks))
        .layer(Extension(store))
        .layer(cors);

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Wallify server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
