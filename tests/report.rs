use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use liftboard::catalog::{ExerciseCatalog, LeaderboardId};
use liftboard::io::files::DirectorySource;
use liftboard::pipeline::build_report;
use liftboard::project::{REPORT_SHEET, build_table};
use liftboard::{LeaderboardEntry, ResultSource, SourceError, ToolError, aggregate};
use tempfile::tempdir;

fn deadlift_catalog() -> ExerciseCatalog {
    let exercises = BTreeMap::from([
        (
            "Deadlift".to_string(),
            BTreeMap::from([
                ("1RM".to_string(), LeaderboardId(1)),
                ("2RM".to_string(), LeaderboardId(2)),
            ]),
        ),
        (
            "Bench Press".to_string(),
            BTreeMap::from([("1RM".to_string(), LeaderboardId(72))]),
        ),
    ]);
    ExerciseCatalog::new(vec!["1RM".into(), "2RM".into()], exercises).expect("valid catalog")
}

fn write_board(dir: &Path, id: u32, payload: serde_json::Value) {
    fs::write(dir.join(format!("{id}.json")), payload.to_string()).expect("payload written");
}

fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook opened");
    let range = workbook
        .worksheet_range(REPORT_SHEET)
        .expect("report sheet present")
        .expect("report sheet readable");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    DataType::String(value) => value.clone(),
                    DataType::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn cached_leaderboards_become_a_workbook() {
    let dir = tempdir().expect("temporary directory");
    write_board(
        dir.path(),
        1,
        serde_json::json!({
            "results": [
                {"Member_ID": 7, "Member_Name": "Sam", "Component_Name": "Deadlift", "Component_Score": "140"},
                {"Member_ID": 9, "Member_Name": "Ana", "Component_Name": "Deadlift", "Component_Score": "120"}
            ]
        }),
    );
    write_board(dir.path(), 2, serde_json::json!({"results": []}));
    write_board(
        dir.path(),
        72,
        serde_json::json!({
            "results": [
                {"Member_ID": 7, "Member_Name": "Sam", "Component_Score": 85}
            ]
        }),
    );

    let catalog = deadlift_catalog();
    let mut source = DirectorySource::new(dir.path());
    let output = dir.path().join("LiftingData.xlsx");

    let summary = build_report(&catalog, &mut source, &output).expect("report built");
    assert_eq!(summary.athletes, 2);
    assert_eq!(summary.rows, 4);

    let rows = read_sheet(&output);
    assert_eq!(rows[0], vec!["Name", "Exercise", "1RM", "2RM"]);
    assert_eq!(rows.len(), 5);

    let mut body: Vec<Vec<String>> = rows[1..].to_vec();
    body.sort();
    assert_eq!(
        body,
        vec![
            vec!["Ana", "Bench Press", "0", "0"],
            vec!["Ana", "Deadlift", "120", "0"],
            vec!["Sam", "Bench Press", "85", "0"],
            vec!["Sam", "Deadlift", "140", "0"],
        ]
    );
}

#[test]
fn missing_cache_file_names_the_leaderboard() {
    let dir = tempdir().expect("temporary directory");
    write_board(dir.path(), 1, serde_json::json!({"results": []}));
    write_board(dir.path(), 72, serde_json::json!({"results": []}));

    let catalog = deadlift_catalog();
    let mut source = DirectorySource::new(dir.path());
    let output = dir.path().join("LiftingData.xlsx");

    let err = build_report(&catalog, &mut source, &output).expect_err("report must fail");

    assert!(matches!(
        err,
        ToolError::Source {
            leaderboard: LeaderboardId(2),
            source: SourceError::Unavailable(_),
            ..
        }
    ));
    assert!(!output.exists(), "no partial report is written");
}

#[test]
fn malformed_payload_is_reported() {
    let dir = tempdir().expect("temporary directory");
    fs::write(dir.path().join("5.json"), "<html>maintenance</html>").expect("payload written");

    let mut source = DirectorySource::new(dir.path());
    let err = source.fetch(LeaderboardId(5)).expect_err("fetch must fail");

    assert!(matches!(err, SourceError::Malformed(_)));
}

#[test]
fn header_follows_catalog_column_order() {
    let catalog = ExerciseCatalog::boxmate();
    let mut source = |_: LeaderboardId| Ok::<Vec<LeaderboardEntry>, SourceError>(Vec::new());

    let identities = aggregate(&catalog, &mut source).expect("aggregation succeeds");
    let table = build_table(&identities, &catalog).expect("table built");

    assert_eq!(
        table.columns,
        vec!["Name", "Exercise", "1RM", "2RM", "3RM", "5RM", "8RM", "10RM", "20RM"]
    );
}

#[test]
fn catalog_file_is_validated() {
    let dir = tempdir().expect("temporary directory");
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        serde_json::json!({
            "rep_maxes": ["1RM"],
            "exercises": {
                "Deadlift": {"1RM": 1},
                "Sumo Deadlift": {"1RM": 1}
            }
        })
        .to_string(),
    )
    .expect("catalog written");

    let err = ExerciseCatalog::from_path(&path).expect_err("duplicate leaderboard rejected");
    assert!(matches!(err, ToolError::Configuration(_)));
}

#[test]
fn blank_scores_and_names_still_produce_a_report() {
    let dir = tempdir().expect("temporary directory");
    write_board(
        dir.path(),
        1,
        serde_json::json!({
            "results": [
                {"Member_ID": 7, "Member_Name": "Sam", "Component_Score": null},
                {"Member_ID": 9, "Component_Score": "120"}
            ]
        }),
    );
    write_board(
        dir.path(),
        2,
        serde_json::json!({
            "results": [
                {"Member_ID": 7, "Member_Name": "Sam", "Component_Score": "130"}
            ]
        }),
    );
    write_board(dir.path(), 72, serde_json::json!({"results": [{"Member_ID": 7}]}));

    let catalog = deadlift_catalog();
    let mut source = DirectorySource::new(dir.path());
    let output = dir.path().join("LiftingData.xlsx");

    let summary = build_report(&catalog, &mut source, &output).expect("report built");
    assert_eq!(summary.athletes, 2);

    let mut body: Vec<Vec<String>> = read_sheet(&output)[1..].to_vec();
    body.sort();
    assert_eq!(
        body,
        vec![
            vec!["", "Bench Press", "0", "0"],
            vec!["", "Deadlift", "120", "0"],
            vec!["Sam", "Bench Press", "0", "0"],
            vec!["Sam", "Deadlift", "0", "130"],
        ]
    );
}
