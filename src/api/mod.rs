//! # API Module
//!
//! HTTP handlers of the Vibester web app.
//!
//! ## Endpoints
//!
//! - `GET /` - landing page
//! - `GET /authorize` - starts the Spotify authorization (PKCE) and redirects
//! - `GET /callback` - finishes the authorization and stores the token in the session
//! - `GET /home` - menu of the available sorts
//! - `GET /genre`, `GET /decade` - run a sort and list the playlists written
//! - `POST /custom` - store custom audio feature ranges in the session
//! - `GET /custom` - run the custom sort with the stored ranges
//! - `GET /health` - status and version
//!
//! Sessions are tracked with a cookie (see [`session`]); every sort run uses
//! the token of the session that asked for it.

mod auth;
mod health;
pub mod pages;
pub mod session;
mod sort;

pub use auth::{authorize, callback};
pub use health::health;
pub use sort::{custom, decade, genre, home, index, save_custom};
