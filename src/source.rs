use crate::catalog::LeaderboardId;
use crate::error::SourceError;
use crate::model::{LeaderboardEntry, LeaderboardResponse};

/// Supplies the entries of one leaderboard at a time.
///
/// Implementations own all I/O; the aggregator only ever calls `fetch` and
/// treats any error as fatal for the run.
pub trait ResultSource {
    fn fetch(&mut self, leaderboard: LeaderboardId) -> Result<Vec<LeaderboardEntry>, SourceError>;
}

impl<F> ResultSource for F
where
    F: FnMut(LeaderboardId) -> Result<Vec<LeaderboardEntry>, SourceError>,
{
    fn fetch(&mut self, leaderboard: LeaderboardId) -> Result<Vec<LeaderboardEntry>, SourceError> {
        self(leaderboard)
    }
}

/// Decodes a raw leaderboard payload as returned by the API.
pub fn parse_leaderboard(payload: &str) -> Result<Vec<LeaderboardEntry>, SourceError> {
    let response: LeaderboardResponse = serde_json::from_str(payload)?;
    Ok(response.results)
}
