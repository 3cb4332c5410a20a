use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{config::Settings, error::RemoteError, spotify, types::Token, utils};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    expires_in: u64,
}

/// Builds the Spotify authorization URL for the PKCE flow.
///
/// The user is sent here by `/authorize`; Spotify redirects back to the
/// configured redirect URI with a `code` once access is granted.
pub fn authorize_url(settings: &Settings, code_verifier: &str) -> Result<Url, RemoteError> {
    let code_challenge = utils::generate_code_challenge(code_verifier);

    Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", settings.scope.as_str()),
        ],
    )
    .map_err(|e| RemoteError::Malformed(format!("invalid authorization url: {}", e)))
}

/// Exchanges an authorization code for an access token.
///
/// `verifier` must be the code verifier whose challenge went out with the
/// authorization request. When a client secret is configured it is sent as
/// HTTP Basic credentials as well.
pub async fn exchange_code_pkce(
    settings: &Settings,
    code: &str,
    verifier: &str,
) -> Result<Token, RemoteError> {
    let form = [
        ("grant_type", "authorization_code"),
        ("client_id", settings.client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", settings.redirect_uri.as_str()),
    ];

    let res = request_token(settings, &form).await?;
    let refresh_token = res.refresh_token.ok_or_else(|| {
        RemoteError::Malformed("token response without refresh_token".to_string())
    })?;

    Ok(Token {
        access_token: res.access_token,
        refresh_token,
        scope: res.scope,
        expires_in: res.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may rotate the refresh token. When the response carries none the
/// old one stays valid and is kept.
pub async fn refresh_token(settings: &Settings, refresh_token: &str) -> Result<Token, RemoteError> {
    let form = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", settings.client_id.as_str()),
    ];

    let res = request_token(settings, &form).await?;

    Ok(Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .unwrap_or_else(|| refresh_token.to_string()),
        scope: res.scope,
        expires_in: res.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

async fn request_token(
    settings: &Settings,
    form: &[(&str, &str)],
) -> Result<TokenResponse, RemoteError> {
    let client = Client::new();
    let mut request = client.post(&settings.token_url).form(form);

    if let Some(secret) = &settings.client_secret {
        let credentials = STANDARD.encode(format!("{}:{}", settings.client_id, secret));
        request = request.header("Authorization", format!("Basic {}", credentials));
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            status,
            endpoint: settings.token_url.clone(),
        });
    }

    spotify::decode(response, &settings.token_url).await
}
