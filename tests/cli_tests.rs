use predicates::prelude::*;
use std::fs;

mod common;
use common::{add_event, init_db, png_bytes, rsl, setup_test_db, temp_out};

/// Pull the id of the first row out of `list` output.
fn first_id(db_path: &str, date: &str) -> String {
    let out = rsl()
        .args(["--db", db_path, "list", "--date", date])
        .output()
        .expect("run list");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();

    stdout
        .lines()
        .find_map(|l| {
            let cells: Vec<&str> = l.split('|').map(str::trim).collect();
            (cells.len() > 2 && cells[0] == "1").then(|| cells[1].to_string())
        })
        .expect("a row numbered 1")
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rsl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_add_and_list_day() {
    let db_path = setup_test_db("cli_add_list");
    init_db(&db_path);

    rsl()
        .args([
            "--db", &db_path, "add", "-n", "42", "-d", "2024-03-01", "--start", "09:00", "--end",
            "10:15", "-r", "power outage",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event #42 saved"))
        .stdout(predicate::str::contains("01:15"));

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== 2024-03-01 ==="))
        .stdout(predicate::str::contains("Duración"))
        .stdout(predicate::str::contains("power outage"))
        .stdout(predicate::str::contains("Events: 1"));
}

#[test]
fn test_list_empty_day() {
    let db_path = setup_test_db("cli_list_empty");
    init_db(&db_path);

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events for 2024-03-02"));
}

#[test]
fn test_add_rejects_inverted_times() {
    let db_path = setup_test_db("cli_add_inverted");
    init_db(&db_path);

    rsl()
        .args([
            "--db", &db_path, "add", "-n", "1", "-d", "2024-03-01", "--start", "10:00", "--end",
            "09:00", "-r", "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be earlier than or equal to"));

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events for 2024-03-01"));
}

#[test]
fn test_add_reports_missing_fields() {
    let db_path = setup_test_db("cli_add_missing");
    init_db(&db_path);

    rsl()
        .args(["--db", &db_path, "add", "--start", "08:00", "--end", "09:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number, reason"));
}

#[test]
fn test_add_missing_photo_file_fails() {
    let db_path = setup_test_db("cli_add_no_photo");
    init_db(&db_path);

    rsl()
        .args([
            "--db", &db_path, "add", "-n", "1", "-d", "2024-03-01", "--start", "08:00", "--end",
            "09:00", "-r", "x", "--photo", "/definitely/not/here.png",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Photo error"));

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events for 2024-03-01"));
}

#[test]
fn test_add_with_photo_shows_marker() {
    let db_path = setup_test_db("cli_add_photo");
    init_db(&db_path);

    let photo = temp_out("cli_photo", "png") + ".png";
    fs::write(&photo, png_bytes()).unwrap();

    rsl()
        .args([
            "--db", &db_path, "add", "-n", "7", "-d", "2024-03-01", "--start", "08:00", "--end",
            "08:10", "-r", "jam", "--photo", &photo,
        ])
        .assert()
        .success();

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[img]"));
}

#[test]
fn test_del_cancelled_keeps_event() {
    let db_path = setup_test_db("cli_del_cancel");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "keep me");
    let id = first_id(&db_path, "2024-03-01");

    rsl()
        .args(["--db", &db_path, "del", &id, "--date", "2024-03-01"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me"));
}

#[test]
fn test_del_confirmed_removes_event() {
    let db_path = setup_test_db("cli_del_confirm");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "first");
    add_event(&db_path, "2024-03-01", "2", "10:00", "11:00", "second");
    let id = first_id(&db_path, "2024-03-01");

    rsl()
        .args(["--db", &db_path, "del", &id, "--date", "2024-03-01"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("has been deleted"));

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("first").not())
        .stdout(predicate::str::contains("Events: 1"));
}

#[test]
fn test_del_unknown_id_with_yes_is_noop() {
    let db_path = setup_test_db("cli_del_unknown");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "stays");

    rsl()
        .args(["--db", &db_path, "del", "12345", "--date", "2024-03-01", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));

    rsl()
        .args(["--db", &db_path, "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Events: 1"));
}

#[test]
fn test_export_csv_via_cli() {
    let db_path = setup_test_db("cli_export_csv");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "42", "09:00", "10:15", "power outage");

    let out = temp_out("cli_export_csv", "csv");
    rsl()
        .args([
            "--db", &db_path, "export", "--file", &out, "--date", "2024-03-01", "--format", "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV export completed"));

    let content = fs::read_to_string(format!("{out}.csv")).unwrap();
    assert!(content.contains("Duración"));
    assert!(content.contains("power outage"));
}

#[test]
fn test_export_pdf_via_cli() {
    let db_path = setup_test_db("cli_export_pdf");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "42", "09:00", "10:15", "power outage");

    let out = temp_out("cli_export_pdf", "pdf");
    rsl()
        .args([
            "--db", &db_path, "export", "--file", &out, "--date", "2024-03-01", "--format", "pdf",
            "--force",
        ])
        .assert()
        .success();

    let bytes = fs::read(format!("{out}.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_blank_name_rejected() {
    let db_path = setup_test_db("cli_export_blank");
    init_db(&db_path);

    rsl()
        .args(["--db", &db_path, "export", "--file", " ", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a name for the export file"));
}

#[test]
fn test_log_print_lists_operations() {
    let db_path = setup_test_db("cli_log");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "logged");

    rsl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"));
}

#[test]
fn test_db_info_shows_totals() {
    let db_path = setup_test_db("cli_db_info");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "a");
    add_event(&db_path, "2024-03-02", "2", "08:00", "09:00", "b");

    rsl()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total events:"))
        .stdout(predicate::str::contains("2024-03-01"))
        .stdout(predicate::str::contains("Integrity check passed"));
}

#[test]
fn test_backup_copies_database() {
    let db_path = setup_test_db("cli_backup");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "a");

    let dest = temp_out("cli_backup", "sqlite") + ".sqlite";
    rsl()
        .args(["--db", &db_path, "backup", "--file", &dest, "--force"])
        .assert()
        .success();

    assert!(fs::metadata(&dest).is_ok());
}

#[test]
fn test_log_print_filters_by_operation() {
    let db_path = setup_test_db("cli_log_filter");
    init_db(&db_path);
    add_event(&db_path, "2024-03-01", "1", "08:00", "09:00", "logged");

    rsl()
        .args(["--db", &db_path, "log", "--print", "--op", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01"))
        .stdout(predicate::str::contains("Database initialized").not());

    rsl()
        .args(["--db", &db_path, "log", "--print", "--op", "backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No 'backup' entries"));
}

#[test]
fn test_relative_db_path_is_the_same_for_init_and_other_commands() {
    let mut workdir = std::env::temp_dir();
    workdir.push("rstoplogger_relative_db");
    fs::remove_dir_all(&workdir).ok();
    fs::create_dir_all(&workdir).unwrap();

    rsl()
        .current_dir(&workdir)
        .args(["--db", "rel.sqlite", "--test", "init"])
        .assert()
        .success();
    assert!(workdir.join("rel.sqlite").exists());

    rsl()
        .current_dir(&workdir)
        .args([
            "--db", "rel.sqlite", "add", "-n", "1", "-d", "2024-03-01", "--start", "08:00",
            "--end", "09:00", "-r", "relative",
        ])
        .assert()
        .success();

    rsl()
        .current_dir(&workdir)
        .args(["--db", "rel.sqlite", "list", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relative"));

    // the event went into the file `init` created
    let store = rstoplogger::db::store::DayStore::open(
        &workdir.join("rel.sqlite").to_string_lossy(),
    )
    .unwrap();
    assert_eq!(store.load(common::d("2024-03-01")).len(), 1);
}
