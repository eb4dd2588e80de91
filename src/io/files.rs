use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::LeaderboardId;
use crate::error::SourceError;
use crate::model::LeaderboardEntry;
use crate::source::{ResultSource, parse_leaderboard};

/// Reads leaderboards previously saved by the download command, one
/// `<id>.json` file per leaderboard.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Creates a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File a leaderboard is cached in.
    pub fn path_for(&self, leaderboard: LeaderboardId) -> PathBuf {
        cache_path(&self.dir, leaderboard)
    }
}

impl ResultSource for DirectorySource {
    fn fetch(&mut self, leaderboard: LeaderboardId) -> Result<Vec<LeaderboardEntry>, SourceError> {
        let path = self.path_for(leaderboard);
        let payload = fs::read_to_string(&path).map_err(|err| {
            SourceError::Unavailable(format!("failed to read {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "read cached leaderboard");
        parse_leaderboard(&payload).map_err(|err| match err {
            SourceError::Malformed(reason) => {
                SourceError::Malformed(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }
}

pub(crate) fn cache_path(dir: &Path, leaderboard: LeaderboardId) -> PathBuf {
    dir.join(format!("{leaderboard}.json"))
}
