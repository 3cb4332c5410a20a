use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the Spotify Web API.
///
/// Every variant is fatal to the sort run that hit it. There is no retry:
/// the request loop in [`crate::fetcher`] is the place a backoff policy
/// would go.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} responded with {status}")]
    Status {
        status: StatusCode,
        endpoint: String,
    },

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum SortError {
    #[error("no saved tracks")]
    NoTracks,

    #[error("{total} saved tracks exceed the limit of {limit}")]
    TooManyTracks { total: u64, limit: u64 },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// What the user gets to see when a sort run does not finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoData,
    TooManyTracks,
    Failure,
}

impl SortError {
    pub fn outcome(&self) -> Outcome {
        match self {
            SortError::NoTracks => Outcome::NoData,
            SortError::TooManyTracks { .. } => Outcome::TooManyTracks,
            SortError::Remote(_) => Outcome::Failure,
        }
    }
}
