use axum::{
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    config::Settings,
    management::{SessionStore, TokenManager},
    spotify::SpotifyClient,
    warning,
};

use super::pages;

pub const SESSION_COOKIE: &str = "vibester_session";

/// Session id from the request's session cookie, if it names a live session.
pub async fn current_session(sessions: &SessionStore, headers: &HeaderMap) -> Option<String> {
    let id = cookie_value(headers, SESSION_COOKIE)?;
    if sessions.has(&id).await {
        Some(id)
    } else {
        None
    }
}

pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

pub fn set_cookie(response: &mut Response, session_id: &str) {
    let cookie = format!(
        "{name}={id}; Path=/; HttpOnly; SameSite=Lax",
        name = SESSION_COOKIE,
        id = session_id
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
}

/// Builds a Spotify client for the request's session.
///
/// A request without an authorized session is sent back to the landing
/// page. An expired token is refreshed and the fresh one stored in the
/// session before the client is built.
pub async fn session_client(
    settings: &Settings,
    sessions: &SessionStore,
    headers: &HeaderMap,
) -> Result<(String, SpotifyClient), Response> {
    let Some(session_id) = current_session(sessions, headers).await else {
        return Err(Redirect::to("/").into_response());
    };
    let Some(token) = sessions.get(&session_id).await.and_then(|s| s.token) else {
        return Err(Redirect::to("/").into_response());
    };

    let mut token_mgr = TokenManager::new(token);
    let access_token = match token_mgr.get_valid_token(settings).await {
        Ok(access_token) => access_token,
        Err(e) => {
            warning!("Failed to refresh token: {}", e);
            return Err(pages::failure());
        }
    };

    let token = token_mgr.into_token();
    sessions
        .update(&session_id, |session| session.token = Some(token))
        .await;

    Ok((
        session_id,
        SpotifyClient::new(&settings.api_url, &access_token),
    ))
}
