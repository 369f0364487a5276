//! Integration tests for the Messier table conversion pipeline.
//!
//! These tests drive `pipeline::run` end to end over small wiki-markup
//! fixtures and validate the CSV output: fixed 12-column header, input
//! order, role-based cell cleaning, skip counting for malformed rows, and
//! the all-or-nothing behavior of image path columns. Image resolution is
//! exercised through stub resolvers; the real Commons/ImageMagick resolver
//! has its own tests next to its implementation.

use messier::models::{ImagePaths, MessierRecord};
use messier::pipeline;
use messier::wikimedia::{DisabledResolver, ImageResolver};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Two well-formed rows in the shape of the real Messier objects table:
/// M1 with free-text distance, M2 with a template-wrapped distance and a
/// sentinel "no common name" cell.
fn sample_table() -> &'static str {
    "{| class=\"wikitable sortable\"\n\
     |-\n\
     ! scope=\"row\" | [[Messier 1|M1]]\n\
     |[[NGC 1952]]\n\
     |[[Crab Nebula]]\n\
     |[[File:Crab Nebula.jpg|thumb|Crab Nebula]]\n\
     |[[Supernova remnant]]\n\
     |{{ntsh|6.5}}6.5\n\
     |[[Taurus (constellation)|Taurus]]\n\
     |8.4\n\
     |6×4\n\
     |05h 34m 31.94s\n\
     |+22° 00′ 52.2″\n\
     |-\n\
     ! scope=\"row\" | [[Messier 2|M2]]\n\
     |[[NGC 7089]]\n\
     |{{sort|z|–}}\n\
     |[[File:Messier 2 Hubble.jpg|thumb]]\n\
     |[[Globular cluster]]\n\
     |{{nts|33}}\n\
     |[[Aquarius (constellation)|Aquarius]]\n\
     |6.3\n\
     |16.0′\n\
     |21h 33m 27.02s\n\
     |−00° 49′ 23.7″\n\
     |}"
}

const EXPECTED_HEADER: [&str; 12] = [
    "Messier number",
    "NGC/IC number",
    "Common name",
    "Image",
    "Image small",
    "Object type",
    "Distance (kly)",
    "Constellation",
    "Apparent magnitude",
    "Apparent dimensions",
    "Right ascension",
    "Declination",
];

/// Resolver standing in for a successful download + thumbnail run.
struct StubResolver;

impl ImageResolver for StubResolver {
    fn resolve(&self, _file_name: &str, row: usize) -> Option<ImagePaths> {
        let n = row - 1;
        Some(ImagePaths {
            full: format!("images/m{n}.jpg"),
            thumb: format!("images/m{n}_small.jpg"),
        })
    }
}

/// Resolver standing in for a reference that fails to resolve (network or
/// converter); indistinguishable from "no reference" in the output.
struct FailingResolver;

impl ImageResolver for FailingResolver {
    fn resolve(&self, _file_name: &str, _row: usize) -> Option<ImagePaths> {
        None
    }
}

fn write_table(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("table.txt");
    fs::write(&path, content).unwrap();
    path
}

fn read_rows(path: &PathBuf) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

#[test]
fn header_matches_fixed_schema() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, sample_table());
    let output = dir.path().join("out.csv");

    pipeline::run(&input, &output, &DisabledResolver).unwrap();

    let (header, rows) = read_rows(&output);
    assert_eq!(header, EXPECTED_HEADER);
    assert_eq!(rows.len(), 2);
}

#[test]
fn cells_are_cleaned_by_column_role() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, sample_table());
    let output = dir.path().join("out.csv");

    pipeline::run(&input, &output, &DisabledResolver).unwrap();

    let (_, rows) = read_rows(&output);
    assert_eq!(
        rows[0],
        vec![
            "M1",
            "NGC 1952",
            "Crab Nebula",
            "",
            "",
            "Supernova remnant",
            "6.5",
            "Taurus",
            "8.4",
            "6×4",
            "05h 34m 31.94s",
            "+22° 00′ 52.2″",
        ]
    );
    // M2: sentinel common name maps to empty, template distance unwraps.
    assert_eq!(rows[1][0], "M2");
    assert_eq!(rows[1][2], "");
    assert_eq!(rows[1][6], "33");
}

#[test]
fn resolved_images_populate_both_path_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, sample_table());
    let output = dir.path().join("out.csv");

    let stats = pipeline::run(&input, &output, &StubResolver).unwrap();
    assert_eq!(stats.images_resolved, 2);

    let (_, rows) = read_rows(&output);
    assert_eq!(rows[0][3], "images/m0.jpg");
    assert_eq!(rows[0][4], "images/m0_small.jpg");
    assert_eq!(rows[1][3], "images/m1.jpg");
    assert_eq!(rows[1][4], "images/m1_small.jpg");
}

#[test]
fn failed_resolution_leaves_both_path_columns_empty() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, sample_table());
    let output = dir.path().join("out.csv");

    let stats = pipeline::run(&input, &output, &FailingResolver).unwrap();
    assert_eq!(stats.images_resolved, 0);
    // Both rows carry a reference that failed to resolve; the counters keep
    // that visible even though the output columns cannot.
    assert_eq!(stats.images_failed, 2);

    let (_, rows) = read_rows(&output);
    for row in &rows {
        assert_eq!(row[3], "");
        assert_eq!(row[4], "");
    }
}

#[test]
fn short_rows_are_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let malformed = "|-\n|only\n|three\n|cells\n";
    let input = write_table(&dir, &format!("{malformed}{}", sample_table()));
    let output = dir.path().join("out.csv");

    let stats = pipeline::run(&input, &output, &DisabledResolver).unwrap();
    assert_eq!(stats.rows_seen, 3);
    assert_eq!(stats.rows_skipped, 1);
    assert_eq!(stats.records_written, 2);

    let (_, rows) = read_rows(&output);
    assert_eq!(rows.len(), 2);
}

#[test]
fn twelve_cell_row_kept_eight_cell_row_dropped() {
    // A well-formed 12-cell row without a file reference and an 8-cell row
    // produce exactly one output record, with both image paths empty.
    let table = "|-\n\
        ! scope=\"row\" | M90\n\
        |[[NGC 4569]]\n\
        |\n\
        |\n\
        |[[Spiral galaxy]]\n\
        |58.7\n\
        |[[Virgo (constellation)|Virgo]]\n\
        |9.5\n\
        |9.5×4.4\n\
        |12h 36m 49.8s\n\
        |+13° 09′ 46″\n\
        |extra\n\
        |-\n\
        |a\n\
        |b\n\
        |c\n\
        |d\n\
        |e\n\
        |f\n\
        |g\n\
        |h\n\
        |}";
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, table);
    let output = dir.path().join("out.csv");

    let stats = pipeline::run(&input, &output, &StubResolver).unwrap();
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.rows_skipped, 1);
    assert_eq!(stats.images_resolved, 0);
    // No reference at all is not a failure.
    assert_eq!(stats.images_failed, 0);

    let (_, rows) = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "M90");
    assert_eq!(rows[0][3], "");
    assert_eq!(rows[0][4], "");
}

#[test]
fn records_round_trip_through_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, sample_table());
    let output = dir.path().join("out.csv");

    pipeline::run(&input, &output, &StubResolver).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let records: Vec<MessierRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].messier_number, "M1");
    assert_eq!(records[0].image, "images/m0.jpg");
    assert_eq!(records[0].distance_kly, "6.5");
    assert_eq!(records[1].ngc_ic_number, "NGC 7089");
    assert_eq!(records[1].common_name, "");
    assert_eq!(records[1].image_small, "images/m1_small.jpg");
}

#[test]
fn reruns_produce_byte_identical_output() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, sample_table());
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    pipeline::run(&input, &first, &DisabledResolver).unwrap();
    pipeline::run(&input, &second, &DisabledResolver).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn missing_input_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("does_not_exist.txt");
    let output = dir.path().join("out.csv");

    let result = pipeline::run(&input, &output, &DisabledResolver);
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn empty_document_yields_header_only() {
    let dir = TempDir::new().unwrap();
    let input = write_table(&dir, "no table markup here");
    let output = dir.path().join("out.csv");

    let stats = pipeline::run(&input, &output, &DisabledResolver).unwrap();
    assert_eq!(stats.rows_seen, 0);
    assert_eq!(stats.records_written, 0);

    let (header, rows) = read_rows(&output);
    assert_eq!(header, EXPECTED_HEADER);
    assert!(rows.is_empty());
}
