//! Configuration management for Vibester.
//!
//! Values come from environment variables. Before anything reads them,
//! [`load_env`] pulls in an optional `.env` file from the local data
//! directory, so a deployment can keep its Spotify credentials out of the
//! shell environment.
//!
//! The configuration is resolved once at startup into [`Settings`], which is
//! then handed to the server and everything below it. Nothing reads the
//! environment after that.

use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_SCOPE: &str = "user-library-read playlist-read-private playlist-modify-public playlist-modify-private playlist-read-collaborative";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `vibester/.env` in the platform specific
/// local data directory:
/// - Linux: `~/.local/share/vibester/.env`
/// - macOS: `~/Library/Application Support/vibester/.env`
/// - Windows: `%LOCALAPPDATA%/vibester/.env`
///
/// The directory is created when missing. A missing `.env` file is fine,
/// the process environment is used as is. A file that exists but cannot be
/// parsed is an error.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vibester/.env");
    path
}

/// Everything the server needs to talk to Spotify on behalf of its users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_addr: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` is the only required variable; every
    /// other one falls back to a default that works against the public
    /// Spotify endpoints on a local machine.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| value(key).unwrap_or_else(|| default.into());

        let client_id = value("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or_else(|| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())?;

        Ok(Settings {
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id,
            client_secret: value("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
