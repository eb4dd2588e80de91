use crate::catalog::ExerciseCatalog;
use crate::error::{Result, ToolError};
use crate::model::IdentityCatalog;

/// Sheet name used for the consolidated report.
pub const REPORT_SHEET: &str = "Sheet1";
/// Leading columns that precede the rep-max columns.
pub const NAME_COLUMN: &str = "Name";
pub const EXERCISE_COLUMN: &str = "Exercise";

/// One athlete × exercise line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub exercise: String,
    /// One score per catalog rep-max column, in column order.
    pub scores: Vec<String>,
}

impl ExportRow {
    /// Cells in header order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.exercise.as_str()]
            .into_iter()
            .chain(self.scores.iter().map(String::as_str))
    }
}

/// A table that will be materialised as a single Excel sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
}

/// Report header: name, exercise, then the catalog's rep-max columns.
pub fn header(catalog: &ExerciseCatalog) -> Vec<String> {
    let mut columns = Vec::with_capacity(catalog.rep_maxes().len() + 2);
    columns.push(NAME_COLUMN.to_string());
    columns.push(EXERCISE_COLUMN.to_string());
    columns.extend(catalog.rep_maxes().iter().cloned());
    columns
}

/// Flattens filled profiles into one row per athlete and exercise.
///
/// Rows come out in athlete-id order, then catalog exercise order. Callers
/// should rely only on every pair appearing exactly once. A profile missing a
/// cell was never filled and is rejected.
pub fn project(identities: &IdentityCatalog, catalog: &ExerciseCatalog) -> Result<Vec<ExportRow>> {
    let mut rows = Vec::with_capacity(identities.len() * catalog.exercise_count());

    for profile in identities {
        for exercise in catalog.exercises() {
            let scores = catalog
                .rep_maxes()
                .iter()
                .map(|rep_max| {
                    profile
                        .score(exercise, rep_max)
                        .map(str::to_string)
                        .ok_or_else(|| ToolError::IncompleteProfile {
                            athlete: profile.id,
                            exercise: exercise.to_string(),
                            rep_max: rep_max.clone(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            rows.push(ExportRow {
                name: profile.name.clone(),
                exercise: exercise.to_string(),
                scores,
            });
        }
    }

    Ok(rows)
}

/// Packages projected rows with their header for the sink.
pub fn build_table(identities: &IdentityCatalog, catalog: &ExerciseCatalog) -> Result<LeaderboardTable> {
    Ok(LeaderboardTable {
        sheet_name: REPORT_SHEET.to_string(),
        columns: header(catalog),
        rows: project(identities, catalog)?,
    })
}
