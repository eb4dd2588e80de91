use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::ExerciseCatalog;

/// Placeholder stored for a cell the athlete has no recorded score for.
pub const SENTINEL_SCORE: &str = "0";

/// Member identifier assigned by the leaderboard API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AthleteId(pub u64);

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single scored entry on one leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Athlete the score belongs to.
    #[serde(rename = "Member_ID")]
    pub athlete: AthleteId,
    /// Display name as published on the leaderboard; blank when the API
    /// sends null or omits it.
    #[serde(rename = "Member_Name", default, deserialize_with = "nullable_text")]
    pub name: String,
    /// Score kept as text; the API does not guarantee numeric formatting.
    /// `None` when the API sends null or omits the score.
    #[serde(rename = "Component_Score", default, deserialize_with = "score_text")]
    pub score: Option<String>,
}

impl LeaderboardEntry {
    /// Creates a scored entry.
    pub fn new(athlete: u64, name: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            athlete: AthleteId(athlete),
            name: name.into(),
            score: Some(score.into()),
        }
    }

    /// Creates an entry the API listed without a score.
    pub fn unscored(athlete: u64, name: impl Into<String>) -> Self {
        Self {
            athlete: AthleteId(athlete),
            name: name.into(),
            score: None,
        }
    }
}

/// Envelope returned by the leaderboard endpoint; only `results` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    pub results: Vec<LeaderboardEntry>,
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn score_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Score {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Score>::deserialize(deserializer)? {
        Some(Score::Text(text)) => Some(text),
        Some(Score::Number(number)) => Some(number.to_string()),
        None => None,
    })
}

/// exercise → rep-max → score.
pub type Lifts = BTreeMap<String, BTreeMap<String, String>>;

/// Everything known about one athlete after folding in leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Identity the profile is keyed by.
    pub id: AthleteId,
    /// Name taken from the first entry observed for this athlete.
    pub name: String,
    /// Recorded scores; complete only after the fill pass.
    pub lifts: Lifts,
}

impl AthleteProfile {
    /// Creates a profile with no scores yet.
    pub fn new(id: AthleteId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lifts: BTreeMap::new(),
        }
    }

    /// Records a score, replacing any earlier one for the same cell.
    pub fn record(&mut self, exercise: &str, rep_max: &str, score: impl Into<String>) {
        self.lifts
            .entry(exercise.to_string())
            .or_default()
            .insert(rep_max.to_string(), score.into());
    }

    /// Score for one cell, if recorded or filled.
    pub fn score(&self, exercise: &str, rep_max: &str) -> Option<&str> {
        self.lifts
            .get(exercise)
            .and_then(|scores| scores.get(rep_max))
            .map(String::as_str)
    }

    /// Number of cells holding a score (sentinels included).
    pub fn score_count(&self) -> usize {
        self.lifts.values().map(BTreeMap::len).sum()
    }

    /// True when every exercise and column of the catalog has a score.
    pub fn is_complete(&self, catalog: &ExerciseCatalog) -> bool {
        catalog.exercises().all(|exercise| {
            catalog
                .rep_maxes()
                .iter()
                .all(|rep_max| self.score(exercise, rep_max).is_some())
        })
    }
}

/// Working set of one aggregation run, keyed by athlete identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityCatalog {
    profiles: BTreeMap<AthleteId, AthleteProfile>,
}

impl IdentityCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the profile for `entry.athlete`, creating it with the entry's
    /// name on first sight.
    pub fn profile_for(&mut self, entry: &LeaderboardEntry) -> &mut AthleteProfile {
        self.profiles
            .entry(entry.athlete)
            .or_insert_with(|| AthleteProfile::new(entry.athlete, entry.name.clone()))
    }

    /// Profile for one athlete.
    pub fn get(&self, id: AthleteId) -> Option<&AthleteProfile> {
        self.profiles.get(&id)
    }

    /// Number of athletes seen.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in athlete-id order.
    pub fn iter(&self) -> btree_map::Values<'_, AthleteId, AthleteProfile> {
        self.profiles.values()
    }

    pub(crate) fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, AthleteId, AthleteProfile> {
        self.profiles.values_mut()
    }
}

impl<'a> IntoIterator for &'a IdentityCatalog {
    type Item = &'a AthleteProfile;
    type IntoIter = btree_map::Values<'a, AthleteId, AthleteProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_payload_with_text_and_numeric_scores() {
        let payload = serde_json::json!({
            "results": [
                {
                    "Member_ID": 7,
                    "Member_Name": "Sam Lee",
                    "Component_Name": "Deadlift 1RM",
                    "Component_Score": "140"
                },
                {
                    "Member_ID": 9,
                    "Member_Name": "Ana Cruz",
                    "Component_Score": 92.5
                }
            ]
        });

        let response: LeaderboardResponse =
            serde_json::from_value(payload).expect("payload parsed");
        assert_eq!(
            response.results,
            vec![
                LeaderboardEntry::new(7, "Sam Lee", "140"),
                LeaderboardEntry::new(9, "Ana Cruz", "92.5"),
            ]
        );
    }

    #[test]
    fn null_or_missing_fields_do_not_fail_the_payload() {
        let payload = r#"{"results": [
            {"Member_ID": 4, "Member_Name": "Kai", "Component_Score": null},
            {"Member_ID": 5, "Member_Name": null, "Component_Score": "60"},
            {"Member_ID": 6}
        ]}"#;

        let response: LeaderboardResponse = serde_json::from_str(payload).expect("payload parsed");
        assert_eq!(
            response.results,
            vec![
                LeaderboardEntry::unscored(4, "Kai"),
                LeaderboardEntry::new(5, "", "60"),
                LeaderboardEntry::unscored(6, ""),
            ]
        );
    }

    #[test]
    fn first_name_sticks() {
        let mut identities = IdentityCatalog::new();
        identities
            .profile_for(&LeaderboardEntry::new(3, "Jo", "1"))
            .record("Deadlift", "1RM", "1");
        identities
            .profile_for(&LeaderboardEntry::new(3, "Joanna", "2"))
            .record("Deadlift", "2RM", "2");

        let profile = identities.get(AthleteId(3)).expect("profile exists");
        assert_eq!(profile.name, "Jo");
        assert_eq!(profile.score_count(), 2);
    }
}
