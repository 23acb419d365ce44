//! Integration tests for history export.

use liver_simulator_x::export::{export_history_csv_to, export_history_json_to, write_history_csv};
use liver_simulator_x::scenario::BaselineScenario;
use liver_simulator_x::HepaticEngine;

fn baseline_history(ticks: usize) -> liver_simulator_x::History {
    HepaticEngine::default()
        .run(&BaselineScenario::new(), ticks)
        .unwrap()
}

#[test]
fn test_csv_one_row_per_tick() {
    let history = baseline_history(25);
    let mut buf = Vec::new();
    write_history_csv(&history, &mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 26);

    let header: Vec<&str> = text.lines().next().unwrap().split(',').collect();
    assert_eq!(header[0], "time");
    assert_eq!(header.len(), 1 + 20 + 6 + 16);
    assert!(header.contains(&"triglycerides"));
    assert!(header.contains(&"rate_lipidTransport"));
}

#[test]
fn test_csv_file_readable() {
    let history = baseline_history(10);
    let path = std::env::temp_dir().join("liver_simulator_x_export_test.csv");
    export_history_csv_to(&history, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let glucose_col = headers.iter().position(|h| h == "glucose").unwrap();

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 10);
    let last: f64 = rows[9][glucose_col].parse().unwrap();
    assert_eq!(last, history.final_value("glucose"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_json_file_round_trip() {
    let history = baseline_history(5);
    let path = std::env::temp_dir().join("liver_simulator_x_export_test.json");
    export_history_json_to(&history, "baseline", &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["ticks"], 5);
    assert_eq!(value["records"].as_array().unwrap().len(), 5);
    assert_eq!(value["records"][4]["time"], 4.0);

    std::fs::remove_file(&path).ok();
}
