use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use outlier_core::{run_scan, FileOutcome, OutlierTable, ScanConfig};

const HEADER: &str = "Stock-ID,Timestamp,Price,Mean,Deviation,Percent_Deviation";

fn write_prices(path: &Path, stock: &str, prices: &[f64]) {
    let base = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
    let body: String = prices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let day = base + Duration::days(i as i64);
            format!("{stock},{},{p}\n", day.format("%d-%m-%Y"))
        })
        .collect();
    fs::write(path, body).unwrap();
}

fn flat_with_spike(n: usize) -> Vec<f64> {
    let mut prices = vec![100.0; n];
    prices[n - 1] = 250.0;
    prices
}

#[test]
fn test_scan_writes_named_reports() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("reports");

    fs::create_dir(input.path().join("NYSE")).unwrap();
    fs::create_dir(input.path().join("LSE")).unwrap();
    // exactly 30 rows, so the whole file is the window
    write_prices(&input.path().join("NYSE/ASH.csv"), "ASH", &flat_with_spike(30));
    write_prices(&input.path().join("LSE/FLTR.csv"), "FLTR", &[16000.0; 45]);

    let mut config = ScanConfig::new(input.path(), &out_dir);
    config.seed = Some(9);
    let summary = run_scan(&config).unwrap();

    assert_eq!(summary.written(), 2);
    assert_eq!(summary.failed(), 0);
    assert_eq!(summary.total_outliers(), 1);

    let nyse = fs::read_to_string(out_dir.join("NYSE_outliers_ASH.csv")).unwrap();
    let lines: Vec<&str> = nyse.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("ASH,2023-09-30,250.0,"));

    let lse = fs::read_to_string(out_dir.join("LSE_outliers_FLTR.csv")).unwrap();
    assert_eq!(lse.trim_end(), HEADER);
    assert_eq!(OutlierTable::HEADERS.join(","), HEADER);
}

#[test]
fn test_bad_files_do_not_stop_the_scan() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let nyse = input.path().join("NYSE");
    fs::create_dir(&nyse).unwrap();

    write_prices(&nyse.join("a_short.csv"), "A", &[1.0; 10]);
    fs::write(nyse.join("b_malformed.csv"), "B,2023/09/01,1.0\n").unwrap();
    write_prices(&nyse.join("c_good.csv"), "C", &[5.0; 40]);

    let mut config = ScanConfig::new(input.path(), output.path());
    config.num_files = 3;
    let summary = run_scan(&config).unwrap();

    assert_eq!(summary.reports.len(), 3);
    assert_eq!(summary.written(), 1);
    assert_eq!(summary.failed(), 2);

    match &summary.reports[0].outcome {
        FileOutcome::Failed { reason } => assert!(reason.contains("Insufficient data")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    match &summary.reports[1].outcome {
        FileOutcome::Failed { reason } => assert!(reason.contains("Parse error")),
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert!(!output.path().join("NYSE_outliers_a_short.csv").exists());
    assert!(!output.path().join("NYSE_outliers_b_malformed.csv").exists());
    assert!(output.path().join("NYSE_outliers_c_good.csv").exists());
}

#[test]
fn test_num_files_limits_each_exchange() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let lse = input.path().join("LSE");
    fs::create_dir(&lse).unwrap();
    for name in ["A.csv", "B.csv", "C.csv"] {
        write_prices(&lse.join(name), "X", &[10.0; 31]);
    }
    fs::create_dir(input.path().join("EMPTY")).unwrap();

    let mut config = ScanConfig::new(input.path(), output.path());
    config.num_files = 2;
    let summary = run_scan(&config).unwrap();

    assert_eq!(summary.written(), 2);
    assert!(output.path().join("LSE_outliers_A.csv").exists());
    assert!(output.path().join("LSE_outliers_B.csv").exists());
    assert!(!output.path().join("LSE_outliers_C.csv").exists());
}

#[test]
fn test_missing_input_dir_is_fatal() {
    let output = tempfile::tempdir().unwrap();
    let config = ScanConfig::new(output.path().join("does-not-exist"), output.path());
    assert!(run_scan(&config).is_err());
}

#[test]
fn test_seeded_scans_match() {
    let input = tempfile::tempdir().unwrap();
    let nse = input.path().join("NSE");
    fs::create_dir(&nse).unwrap();
    let prices: Vec<f64> = (0..200)
        .map(|i| if i % 17 == 0 { 400.0 } else { 100.0 + (i % 5) as f64 })
        .collect();
    write_prices(&nse.join("INFY.csv"), "INFY", &prices);

    let run = |seed| {
        let output = tempfile::tempdir().unwrap();
        let mut config = ScanConfig::new(input.path(), output.path());
        config.seed = Some(seed);
        run_scan(&config).unwrap();
        fs::read_to_string(output.path().join("NSE_outliers_INFY.csv")).unwrap()
    };
    assert_eq!(run(123), run(123));
}
