//! Core library for the liftboard command line application.
//!
//! The crate pulls per-exercise leaderboards from the Boxmate member API and
//! consolidates them into one spreadsheet row per athlete and exercise. The
//! modules keep responsibilities narrow: the leaderboard layout lives in
//! [`catalog`], the per-athlete working set in [`model`], the two-phase
//! merge/fill engine in [`aggregate`], row flattening in [`project`], network
//! and file adapters under [`io`], and the end-to-end commands in
//! [`pipeline`].

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod project;
pub mod source;

pub use aggregate::{aggregate, fill_missing, merge};
pub use catalog::{ExerciseCatalog, LeaderboardId};
pub use error::{Result, SourceError, ToolError};
pub use model::{AthleteId, AthleteProfile, IdentityCatalog, LeaderboardEntry, SENTINEL_SCORE};
pub use project::{ExportRow, project};
pub use source::ResultSource;
