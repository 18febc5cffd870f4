// tests/export.rs
use std::fs;

use tc_scrape::config::options::{AppOptions, ExportFormat, ExportType};
use tc_scrape::file::{to_export_string, write_export};
use tc_scrape::{ExtractionResult, Record, StatKind, StatValue};

fn records() -> Vec<Record> {
    let mut amy = ExtractionResult::default();
    amy.set(StatKind::Followers, StatValue::Found("12,850".into()));
    amy.set(StatKind::Likes, StatValue::Found("34".into()));
    vec![
        Record { username: "amy".into(), stats: amy },
        Record { username: "b.o b".into(), stats: ExtractionResult::default() },
    ]
}

#[test]
fn csv_quotes_grouped_numbers() {
    let text = to_export_string(&records(), ExportFormat::Csv, true).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("username,followers,likes,following,videos"));
    assert_eq!(lines.next(), Some("amy,\"12,850\",34,Not found,Not found"));
    assert_eq!(lines.next(), Some("b.o b,Not found,Not found,Not found,Not found"));
    assert_eq!(lines.next(), None);
}

#[test]
fn tsv_without_headers() {
    let text = to_export_string(&records(), ExportFormat::Tsv, false).unwrap();
    assert!(text.starts_with("amy\t12,850\t34\tNot found\tNot found\n"));
}

#[test]
fn json_array_of_objects() {
    let text = to_export_string(&records(), ExportFormat::Json, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["username"], "amy");
    assert_eq!(arr[0]["followers"], "12,850");
    assert_eq!(arr[1]["videos"], "Not found");
}

#[test]
fn single_file_keeps_user_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = AppOptions::default();
    opts.export.set_path(tmp.path().join("nested/today.txt").to_str().unwrap());
    opts.export.format = ExportFormat::Tsv;

    let written = write_export(&opts.export, &records()).unwrap();
    assert_eq!(written, vec![tmp.path().join("nested").join("today.txt")]);
    let text = fs::read_to_string(&written[0]).unwrap();
    assert!(text.contains("amy\t12,850"));
}

#[test]
fn per_user_json_files() {
    let tmp = tempfile::tempdir().unwrap();
    let mut opts = AppOptions::default();
    opts.export.export_type = ExportType::PerUser;
    opts.export.set_path(tmp.path().join("users").to_str().unwrap());

    let mut recs = records();
    recs.push(Record { username: "amy".into(), stats: ExtractionResult::default() });

    let written = write_export(&opts.export, &recs).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["amy_data.json", "b.o_b_data.json", "amy_data (2).json"]);

    let first: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(first["likes"], "34");
    assert_eq!(first.as_object().unwrap().len(), 5);
}
