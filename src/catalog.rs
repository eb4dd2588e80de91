use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::project::{EXERCISE_COLUMN, NAME_COLUMN};

/// Rep-max columns exposed by the default catalog, in report order.
pub const DEFAULT_REP_MAXES: [&str; 7] = ["1RM", "2RM", "3RM", "5RM", "8RM", "10RM", "20RM"];

/// Opaque identifier of one leaderboard (one exercise at one rep-max).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardId(pub u32);

impl fmt::Display for LeaderboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One queryable cell of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCell<'a> {
    pub exercise: &'a str,
    pub rep_max: &'a str,
    pub leaderboard: LeaderboardId,
}

/// Static description of which leaderboards make up the report.
///
/// Keys are validated on construction: column labels are unique, every
/// exercise only names declared columns, and no leaderboard identifier is
/// shared between two cells. Every exercise exposes the full column set to
/// the rest of the crate even when it has no leaderboard for some label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCatalog {
    rep_maxes: Vec<String>,
    exercises: BTreeMap<String, BTreeMap<String, LeaderboardId>>,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub rep_maxes: Vec<String>,
    pub exercises: BTreeMap<String, BTreeMap<String, LeaderboardId>>,
}

impl ExerciseCatalog {
    /// Builds a catalog, rejecting any configuration that breaks the key
    /// invariants.
    pub fn new(
        rep_maxes: Vec<String>,
        exercises: BTreeMap<String, BTreeMap<String, LeaderboardId>>,
    ) -> Result<Self> {
        if rep_maxes.is_empty() {
            return Err(ToolError::Configuration(
                "at least one rep-max column is required".into(),
            ));
        }

        let mut columns = HashSet::new();
        for label in &rep_maxes {
            if label.trim().is_empty() {
                return Err(ToolError::Configuration("empty rep-max label".into()));
            }
            if label == NAME_COLUMN || label == EXERCISE_COLUMN {
                return Err(ToolError::Configuration(format!(
                    "rep-max label '{label}' collides with a report column"
                )));
            }
            if !columns.insert(label.as_str()) {
                return Err(ToolError::Configuration(format!(
                    "duplicate rep-max column '{label}'"
                )));
            }
        }

        if exercises.is_empty() {
            return Err(ToolError::Configuration(
                "at least one exercise is required".into(),
            ));
        }

        let mut owners: HashMap<LeaderboardId, (&str, &str)> = HashMap::new();
        for (exercise, cells) in &exercises {
            if exercise.trim().is_empty() {
                return Err(ToolError::Configuration("empty exercise name".into()));
            }
            for (rep_max, leaderboard) in cells {
                if !columns.contains(rep_max.as_str()) {
                    return Err(ToolError::Configuration(format!(
                        "exercise '{exercise}' uses undeclared rep-max '{rep_max}'"
                    )));
                }
                if let Some((other_exercise, other_rep_max)) =
                    owners.insert(*leaderboard, (exercise.as_str(), rep_max.as_str()))
                {
                    return Err(ToolError::Configuration(format!(
                        "leaderboard {leaderboard} is assigned to both \
                         {other_exercise} {other_rep_max} and {exercise} {rep_max}"
                    )));
                }
            }
        }

        Ok(Self {
            rep_maxes,
            exercises,
        })
    }

    /// The leaderboards published by the Boxmate member API.
    pub fn boxmate() -> Self {
        let table: [(&str, &[(&str, u32)]); 6] = [
            (
                "Front Squat",
                &[
                    ("1RM", 49),
                    ("2RM", 50),
                    ("3RM", 51),
                    ("5RM", 52),
                    ("10RM", 53),
                    ("20RM", 338),
                ],
            ),
            (
                "Back Squat",
                &[
                    ("1RM", 25),
                    ("2RM", 26),
                    ("3RM", 27),
                    ("5RM", 28),
                    ("8RM", 29),
                    ("10RM", 30),
                    ("20RM", 335),
                ],
            ),
            (
                "Deadlift",
                &[
                    ("1RM", 1),
                    ("2RM", 2),
                    ("3RM", 3),
                    ("5RM", 4),
                    ("8RM", 5),
                    ("10RM", 6),
                    ("20RM", 334),
                ],
            ),
            (
                "Sumo Deadlift",
                &[
                    ("1RM", 13),
                    ("2RM", 14),
                    ("3RM", 15),
                    ("5RM", 16),
                    ("8RM", 17),
                    ("10RM", 18),
                    ("20RM", 337),
                ],
            ),
            (
                "Bench Press",
                &[
                    ("1RM", 72),
                    ("2RM", 73),
                    ("3RM", 74),
                    ("5RM", 75),
                    ("8RM", 76),
                    ("10RM", 77),
                    ("20RM", 336),
                ],
            ),
            (
                "Strict Press",
                &[
                    ("1RM", 130),
                    ("2RM", 131),
                    ("3RM", 132),
                    ("5RM", 133),
                    ("8RM", 331),
                    ("10RM", 134),
                    ("20RM", 333),
                ],
            ),
        ];

        let exercises = table
            .iter()
            .map(|(exercise, cells)| {
                let cells = cells
                    .iter()
                    .map(|(rep_max, id)| (rep_max.to_string(), LeaderboardId(*id)))
                    .collect();
                (exercise.to_string(), cells)
            })
            .collect();

        Self {
            rep_maxes: DEFAULT_REP_MAXES.iter().map(|s| s.to_string()).collect(),
            exercises,
        }
    }

    /// Loads and validates a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&data)?;
        Self::try_from(file)
    }

    /// Rep-max labels in report column order.
    pub fn rep_maxes(&self) -> &[String] {
        &self.rep_maxes
    }

    /// Exercise names in catalog order.
    pub fn exercises(&self) -> impl Iterator<Item = &str> {
        self.exercises.keys().map(String::as_str)
    }

    /// Number of exercises, and so the number of rows per athlete.
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Leaderboard for one cell, if the exercise publishes that rep-max.
    pub fn leaderboard(&self, exercise: &str, rep_max: &str) -> Option<LeaderboardId> {
        self.exercises.get(exercise)?.get(rep_max).copied()
    }

    /// Every cell that has a leaderboard behind it.
    pub fn cells(&self) -> impl Iterator<Item = CatalogCell<'_>> {
        self.exercises.iter().flat_map(|(exercise, cells)| {
            cells.iter().map(move |(rep_max, leaderboard)| CatalogCell {
                exercise: exercise.as_str(),
                rep_max: rep_max.as_str(),
                leaderboard: *leaderboard,
            })
        })
    }
}

impl TryFrom<CatalogFile> for ExerciseCatalog {
    type Error = ToolError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        Self::new(file.rep_maxes, file.exercises)
    }
}
