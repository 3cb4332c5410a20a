use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::{server::AppState, spotify, success, utils, warning};

use super::{pages, session};

pub async fn authorize(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    let session_id = match session::current_session(&state.sessions, &headers).await {
        Some(id) => id,
        None => state.sessions.create().await,
    };

    let code_verifier = utils::generate_code_verifier();
    let auth_url = match spotify::auth::authorize_url(&state.settings, &code_verifier) {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot build authorization url: {}", e);
            return pages::failure();
        }
    };

    state
        .sessions
        .update(&session_id, |s| s.code_verifier = Some(code_verifier))
        .await;

    let mut response = Redirect::to(auth_url.as_str()).into_response();
    session::set_cookie(&mut response, &session_id);
    response
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    if let Some(error) = params.get("error") {
        warning!("Authorization denied: {}", error);
        if let Some(session_id) = session::current_session(&state.sessions, &headers).await {
            state.sessions.remove(&session_id).await;
        }
        return pages::message(StatusCode::UNAUTHORIZED, "Authorization was denied.");
    }

    let Some(code) = params.get("code") else {
        return pages::message(StatusCode::BAD_REQUEST, "Missing authorization code.");
    };

    let Some(session_id) = session::current_session(&state.sessions, &headers).await else {
        return pages::message(StatusCode::BAD_REQUEST, "Missing session.");
    };

    let Some(verifier) = state
        .sessions
        .get(&session_id)
        .await
        .and_then(|s| s.code_verifier)
    else {
        return pages::message(StatusCode::BAD_REQUEST, "Missing PKCE code verifier.");
    };

    match spotify::auth::exchange_code_pkce(&state.settings, code, &verifier).await {
        Ok(token) => {
            state
                .sessions
                .update(&session_id, |s| {
                    s.code_verifier = None;
                    s.token = Some(token);
                })
                .await;
            success!("Session authorized");
            Redirect::to("/home").into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            state.sessions.remove(&session_id).await;
            pages::message(StatusCode::UNAUTHORIZED, "Login failed.")
        }
    }
}
