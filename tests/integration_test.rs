use std::fs;

use whos_alive_lib::config::{CorruptionPolicy, PopulationConfig};
use whos_alive_lib::error::PopulationError;
use whos_alive_lib::execute;
use whos_alive_lib::occupancy::count_population_file;
use whos_alive_lib::record::{PersonRecord, YEAR_BEGIN, YEAR_END};

#[test]
fn integration_generate_then_analyze() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("people.txt");
    let n = 500u64;

    let report = execute(&PopulationConfig::new(&path).with_size(n)).expect("generate");
    assert!(report.is_empty());

    let text = fs::read_to_string(&path).expect("read back");
    assert_eq!(text.lines().count() as u64, n);
    for (ix, line) in text.lines().enumerate() {
        let p = PersonRecord::parse_line(line, ix as u64 + 1).expect("valid line");
        assert!(YEAR_BEGIN <= p.birth_year() && p.death_year() <= YEAR_END);
    }

    let census = count_population_file(&path, CorruptionPolicy::Halt).expect("analyze");
    assert_eq!(census.records, n);
    let max = census.max_population().expect("non-empty");
    assert!(max.count >= 1 && max.count <= n);
    assert!(!max.years.is_empty());
    assert!(max.years.iter().all(|y| (YEAR_BEGIN..=YEAR_END).contains(y)));
    assert!(max.years.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn integration_generate_with_analyze_reports_peak() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("people.txt");
    let mut config = PopulationConfig::new(&path).with_size(50);
    config.analyze_after_generate = true;
    config.histogram = true;

    let report = execute(&config).expect("run");
    assert!(report.contains("with the highest population"));
    assert!(report.contains("2000 "));
}

#[test]
fn integration_tie_reporting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ties.txt");
    // 1900..=1901 -> 3, 1902..=1904 -> 5, 1905 -> 2
    let rows = [
        (1900, 1905),
        (1900, 1905),
        (1900, 1904),
        (1902, 1904),
        (1902, 1904),
    ];
    let body: String = rows
        .iter()
        .map(|&(b, d)| format!("{}\n", PersonRecord::new(b, d, 1).unwrap()))
        .collect();
    fs::write(&path, body).expect("write");

    let report = execute(&PopulationConfig::new(&path)).expect("analyze");
    assert!(report.contains("The 3 years with the highest population (5) were:"));
    assert!(report.contains("{ 1902, 1903, 1904 }"));
}

#[test]
fn integration_empty_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").expect("write");

    let report = execute(&PopulationConfig::new(&path)).expect("analyze");
    assert!(report.starts_with("There were no records to process"));
}

#[test]
fn integration_corruption_halts_at_record_three() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.txt");
    fs::write(
        &path,
        "a;b;1900;1950\na;b;1910;1960\na;b;1920;oops\na;b;1930;1970\n",
    )
    .expect("write");

    let err = execute(&PopulationConfig::new(&path)).unwrap_err();
    assert_eq!(err.record_number(), Some(3));
    assert!(err.to_string().contains("oops"));

    let report = execute(&PopulationConfig::new(&path).with_policy(CorruptionPolicy::Skip))
        .expect("skip policy");
    assert!(report.contains("Skipped 1 corrupt record(s):"));
    assert!(report.contains("The 21 years with the highest population (3) were:"));
}

#[test]
fn integration_missing_file_is_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = execute(&PopulationConfig::new(dir.path().join("absent.txt"))).unwrap_err();
    assert!(matches!(err, PopulationError::Configuration(_)));
}

#[test]
fn integration_analysis_is_repeatable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("people.txt");
    execute(&PopulationConfig::new(&path).with_size(200)).expect("generate");
    let first = execute(&PopulationConfig::new(&path)).expect("first");
    let second = execute(&PopulationConfig::new(&path)).expect("second");
    assert_eq!(first, second);
}

#[test]
fn integration_non_utf8_names_are_analyzed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"Jos\xe9;Garc\xeda;1950;1960\na;b;1955;1970\n".as_slice()).expect("write");

    for policy in [CorruptionPolicy::Halt, CorruptionPolicy::Skip] {
        let report = execute(&PopulationConfig::new(&path).with_policy(policy)).expect("analyze");
        assert!(report.contains("The 6 years with the highest population (2) were:"));
        assert!(report.contains("{ 1955, 1956, 1957, 1958, 1959, 1960 }"));
        assert!(!report.contains("Skipped"));
    }
}

#[test]
fn integration_records_outside_window_are_not_an_empty_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("future.txt");
    fs::write(&path, "a;b;2010;2020\na;b;2030;2040\n").expect("write");

    let report = execute(&PopulationConfig::new(&path)).expect("analyze");
    assert!(!report.contains("no records to process"));
    assert!(report.contains("The 101 years with the highest population (0) were:"));
}
