//! Vibester
//!
//! A small web app that sorts a Spotify user's saved tracks into playlists:
//! one per broad genre, one per release decade, or a single playlist of the
//! tracks whose audio features fall inside ranges the user picked.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the web app
//! - `classifier` - genre, decade and audio feature classification
//! - `cli` - command implementations behind the binary
//! - `config` - configuration from environment variables
//! - `error` - error types of the sort pipeline
//! - `fetcher` - paginated and batched retrieval from Spotify
//! - `management` - session and token management
//! - `pipeline` - the genre, decade and custom sort runs
//! - `reconciler` - writing category groupings out as playlists
//! - `server` - router and HTTP server
//! - `spotify` - Spotify Web API client
//! - `types` - data structures and type definitions
//! - `utils` - utility functions and helpers
//!
//! # Example
//!
//! ```
//! use vibester::{config, pipeline, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> vibester::Res<()> {
//!     let settings = config::Settings::from_env()?;
//!     let client = SpotifyClient::new(&settings.api_url, "access-token");
//!     let playlist_ids = pipeline::run_genre_sort(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod management;
pub mod pipeline;
pub mod reconciler;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use vibester::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Starting Vibester on {}", url);
/// info!("Creating playlist {} with {} tracks", name, count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Session authorized");
/// success!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// error!("Invalid configuration. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// warning!("Spotify call {} failed with {}", endpoint, status);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
