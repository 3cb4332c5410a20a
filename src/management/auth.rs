use chrono::Utc;

use crate::{config::Settings, error::RemoteError, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN: u64 = 240;

/// Keeps one session's token fresh.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Returns an access token that is good for a while longer, refreshing
    /// it through Spotify first when it is about to run out.
    pub async fn get_valid_token(&mut self, settings: &Settings) -> Result<String, RemoteError> {
        if self.is_expired() {
            self.token = spotify::auth::refresh_token(settings, &self.token.refresh_token).await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}
