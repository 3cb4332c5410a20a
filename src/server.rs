use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{Res, api, config::Settings, management::SessionStore, success};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            settings: Arc::new(settings),
            sessions: SessionStore::new(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/authorize", get(api::authorize))
        .route("/callback", get(api::callback))
        .route("/home", get(api::home))
        .route("/genre", get(api::genre))
        .route("/decade", get(api::decade))
        .route("/custom", get(api::custom).post(api::save_custom))
        .layer(Extension(state))
}

pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", settings.server_addr, e))?;

    let app = create_router(AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
