use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::LeaderboardId;
use crate::model::AthleteId;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads its catalog, pulls leaderboards, aggregates, or writes reports.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failures outside of a leaderboard fetch (authentication).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the exercise catalog violates one of its invariants.
    #[error("invalid exercise catalog: {0}")]
    Configuration(String),

    /// A leaderboard could not be fetched or decoded. Fatal to the run.
    #[error("leaderboard {leaderboard} ({exercise} {rep_max}): {source}")]
    Source {
        exercise: String,
        rep_max: String,
        leaderboard: LeaderboardId,
        #[source]
        source: SourceError,
    },

    /// Raised when a profile reaches the projector with an unfilled cell.
    #[error("athlete {athlete} has no score for {exercise} {rep_max}")]
    IncompleteProfile {
        athlete: AthleteId,
        exercise: String,
        rep_max: String,
    },

    /// Raised when the API rejects the supplied credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Raised when a command needs credentials or a token that were not given.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// Raised when the user provides a path that does not exist.
    #[error("input directory not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Failure reported by a result source for a single leaderboard.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The payload could not be retrieved (network, status code, missing file).
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The payload was retrieved but is not a leaderboard response.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Malformed(err.to_string())
    }
}
