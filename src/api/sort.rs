use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::{pipeline, server::AppState, types::CustomCriteria, warning};

use super::{pages, session};

pub async fn index() -> impl IntoResponse {
    pages::index()
}

pub async fn home(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    let authorized = match session::current_session(&state.sessions, &headers).await {
        Some(id) => state
            .sessions
            .get(&id)
            .await
            .is_some_and(|s| s.token.is_some()),
        None => false,
    };

    if authorized {
        pages::home().into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

pub async fn genre(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    let (_, client) =
        match session::session_client(&state.settings, &state.sessions, &headers).await {
            Ok(c) => c,
            Err(response) => return response,
        };

    match pipeline::run_genre_sort(&client).await {
        Ok(ids) => pages::playlists("genre", &ids),
        Err(e) => {
            warning!("Genre sort failed: {}", e);
            pages::outcome(e.outcome())
        }
    }
}

pub async fn decade(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    let (_, client) =
        match session::session_client(&state.settings, &state.sessions, &headers).await {
            Ok(c) => c,
            Err(response) => return response,
        };

    match pipeline::run_decade_sort(&client).await {
        Ok(ids) => pages::playlists("decade", &ids),
        Err(e) => {
            warning!("Decade sort failed: {}", e);
            pages::outcome(e.outcome())
        }
    }
}

/// Stores the custom sort ranges for the next `GET /custom`.
pub async fn save_custom(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(criteria): Json<CustomCriteria>,
) -> Response {
    let Some(session_id) = session::current_session(&state.sessions, &headers).await else {
        return pages::message(StatusCode::UNAUTHORIZED, "Connect with Spotify first.");
    };

    state
        .sessions
        .update(&session_id, |s| s.custom_criteria = Some(criteria))
        .await;

    StatusCode::NO_CONTENT.into_response()
}

pub async fn custom(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    let (session_id, client) =
        match session::session_client(&state.settings, &state.sessions, &headers).await {
            Ok(c) => c,
            Err(response) => return response,
        };

    let Some(criteria) = state
        .sessions
        .get(&session_id)
        .await
        .and_then(|s| s.custom_criteria)
    else {
        return pages::message(StatusCode::BAD_REQUEST, "No custom ranges were submitted.");
    };

    match pipeline::run_custom_sort(&client, &criteria).await {
        Ok(id) => pages::playlists("custom", &[id]),
        Err(e) => {
            warning!("Custom sort failed: {}", e);
            pages::outcome(e.outcome())
        }
    }
}
