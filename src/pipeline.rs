use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::aggregate::aggregate;
use crate::catalog::ExerciseCatalog;
use crate::error::{Result, ToolError};
use crate::io::api::ApiSource;
use crate::io::excel_write;
use crate::io::files::cache_path;
use crate::project::build_table;
use crate::source::ResultSource;

/// Counts reported back to the caller after a report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub athletes: usize,
    pub rows: usize,
}

/// Aggregates every leaderboard from `source` and writes the consolidated
/// workbook to `output`.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn build_report<S>(
    catalog: &ExerciseCatalog,
    source: &mut S,
    output: &Path,
) -> Result<ReportSummary>
where
    S: ResultSource + ?Sized,
{
    let identities = aggregate(catalog, source)?;
    let table = build_table(&identities, catalog)?;
    let summary = ReportSummary {
        athletes: identities.len(),
        rows: table.rows.len(),
    };
    excel_write::write_table(output, &table)?;
    info!(athletes = summary.athletes, rows = summary.rows, "report written");
    Ok(summary)
}

/// Saves the raw payload of every catalog leaderboard as `<dir>/<id>.json`.
///
/// Leaderboards are fetched one after another; the first failure stops the
/// download.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn download(catalog: &ExerciseCatalog, api: &ApiSource, dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;

    let mut saved = 0;
    for cell in catalog.cells() {
        let body = api
            .fetch_raw(cell.leaderboard)
            .map_err(|source| ToolError::Source {
                exercise: cell.exercise.to_string(),
                rep_max: cell.rep_max.to_string(),
                leaderboard: cell.leaderboard,
                source,
            })?;
        let path = cache_path(dir, cell.leaderboard);
        fs::write(&path, body)?;
        info!(leaderboard = %cell.leaderboard, path = %path.display(), "saved leaderboard");
        saved += 1;
    }

    Ok(saved)
}
