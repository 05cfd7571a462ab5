use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/statement.txt")
}

fn folioscan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folioscan").unwrap();
    cmd.env("FOLIOSCAN_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("FOLIOSCAN_PDF_PASSWORD");
    cmd
}

#[test]
fn test_convert_writes_csv() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.csv");

    folioscan(&home)
        .args(["convert", "--format", "csv", "--output"])
        .arg(&out)
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("created successfully"));

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "instrument_name,instrument_id,account_id,date,transaction_kind,amount,units,nav,balance_units"
    );
    assert_eq!(
        lines[1],
        "Aditya Birla Sun Life Liquid Fund - Growth-Direct Plan,INF209K01VA3,1039837274,26-Apr-2020,Buy,360000.00,1122.052,320.8408,1122.052"
    );
    assert!(lines[2].contains(",21-Mar-2021,Sell,50000.00,150.123,333.0000,971.929"));
}

#[test]
fn test_convert_csv_defaults_to_timestamped_file() {
    let home = TempDir::new().unwrap();
    let out_dir = home.path().join("exports");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(
        home.path().join("config.toml"),
        format!("[output]\nformat = \"csv\"\ndirectory = {:?}\n", out_dir.display().to_string()),
    )
    .unwrap();

    folioscan(&home).arg("convert").arg(fixture()).assert().success();

    let names: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("CAMS_data_"));
    assert!(names[0].ends_with(".csv"));
}

#[test]
fn test_convert_json_to_stdout() {
    let home = TempDir::new().unwrap();
    folioscan(&home)
        .args(["convert", "--format", "json"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"[{"instrument_name":"Aditya Birla"#))
        .stdout(predicate::str::contains(r#""transaction_kind":"Sell""#));
}

#[test]
fn test_convert_table_alias() {
    let home = TempDir::new().unwrap();
    folioscan(&home)
        .args(["convert", "--format", "df"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("[2 rows x 9 columns]"));
}

#[test]
fn test_unsupported_format_fails_before_parsing() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.xlsx");

    folioscan(&home)
        .args(["convert", "--format", "xlsx", "--output"])
        .arg(&out)
        .arg(home.path().join("does-not-exist.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output format 'xlsx'"))
        .stderr(predicate::str::contains("does-not-exist").not());

    assert!(!out.exists());
}

#[test]
fn test_missing_document_fails_but_others_are_written() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.json");

    folioscan(&home)
        .args(["convert", "--format", "json", "--output"])
        .arg(&out)
        .arg(home.path().join("missing.txt"))
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 documents could not be parsed"));

    let json = fs::read_to_string(&out).unwrap();
    assert!(json.contains("INF209K01VA3"));
}

#[test]
fn test_strict_flag_drops_orphan_lines() {
    let home = TempDir::new().unwrap();
    let doc = home.path().join("orphan.txt");
    fs::write(&doc, "26-Apr-2020 Purchase 100.00 1.000 100.0000 1.000\n").unwrap();

    folioscan(&home)
        .args(["convert", "--format", "json", "--strict"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn test_inspect_labels_lines() {
    let home = TempDir::new().unwrap();
    folioscan(&home)
        .arg("inspect")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("    4  account     Folio No:"))
        .stdout(predicate::str::contains("    5  instrument"))
        .stdout(predicate::str::contains("    7  buy         26-Apr-2020"))
        .stdout(predicate::str::contains("    8  sell        21-Mar-2021"))
        .stdout(predicate::str::contains("    1  -           Consolidated"));
}

#[test]
fn test_init_config_writes_defaults() {
    let home = TempDir::new().unwrap();
    folioscan(&home).arg("init-config").assert().success();

    let written = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("format = \"csv\""));
    assert!(written.contains("password_env = \"FOLIOSCAN_PDF_PASSWORD\""));

    folioscan(&home)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_long_version_carries_build_stamp() {
    let home = TempDir::new().unwrap();
    folioscan(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^folioscan \d+\.\d+\.\d+ \(\S+\)\n$").unwrap());
}
