use tracing::{debug, info, instrument};

use crate::catalog::ExerciseCatalog;
use crate::error::{Result, ToolError};
use crate::model::{IdentityCatalog, SENTINEL_SCORE};
use crate::source::ResultSource;

/// Pulls every leaderboard in the catalog and merges them into one profile
/// per athlete, then fills the cells nobody scored.
///
/// A single failed fetch aborts the whole run; no partial catalog is returned.
#[instrument(level = "info", skip_all, fields(exercises = catalog.exercise_count()))]
pub fn aggregate<S>(catalog: &ExerciseCatalog, source: &mut S) -> Result<IdentityCatalog>
where
    S: ResultSource + ?Sized,
{
    let mut identities = merge(catalog, source)?;
    fill_missing(&mut identities, catalog);
    info!(athletes = identities.len(), "aggregation complete");
    Ok(identities)
}

/// Merge phase: folds each leaderboard into the identity catalog.
///
/// A repeated (athlete, exercise, rep-max) keeps the last score seen. An
/// entry without a score never overwrites one.
pub fn merge<S>(catalog: &ExerciseCatalog, source: &mut S) -> Result<IdentityCatalog>
where
    S: ResultSource + ?Sized,
{
    let mut identities = IdentityCatalog::new();

    for cell in catalog.cells() {
        let entries = source
            .fetch(cell.leaderboard)
            .map_err(|source| ToolError::Source {
                exercise: cell.exercise.to_string(),
                rep_max: cell.rep_max.to_string(),
                leaderboard: cell.leaderboard,
                source,
            })?;
        debug!(
            leaderboard = %cell.leaderboard,
            exercise = cell.exercise,
            rep_max = cell.rep_max,
            entries = entries.len(),
            "merging leaderboard"
        );

        for entry in entries {
            let profile = identities.profile_for(&entry);
            // Unscored entries still register the athlete; the fill pass
            // covers the cell.
            if let Some(score) = entry.score {
                profile.record(cell.exercise, cell.rep_max, score);
            }
        }
    }

    Ok(identities)
}

/// Fill phase: every profile gets a score for every exercise and column,
/// using [`SENTINEL_SCORE`] where none was recorded.
pub fn fill_missing(identities: &mut IdentityCatalog, catalog: &ExerciseCatalog) {
    let mut filled = 0usize;
    for profile in identities.iter_mut() {
        for exercise in catalog.exercises() {
            let scores = profile.lifts.entry(exercise.to_string()).or_default();
            for rep_max in catalog.rep_maxes() {
                scores.entry(rep_max.clone()).or_insert_with(|| {
                    filled += 1;
                    SENTINEL_SCORE.to_string()
                });
            }
        }
    }
    debug!(filled, "filled missing cells");
}
