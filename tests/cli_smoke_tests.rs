use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("cashflow_core_cli").expect("binary built");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_prints_usage() {
    cli()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn unknown_command_fails_with_context() {
    cli()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn demo_then_summary_reports_the_seeded_totals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf8 path");

    cli()
        .args(["demo", "--data-dir", data_dir, "--month", "2026-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("May 2026"));

    cli()
        .args(["summary", "--data-dir", data_dir, "--month", "2026-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("May 2026"))
        .stdout(predicate::str::contains("$5,562"))
        .stdout(predicate::str::contains("$2,927"))
        .stdout(predicate::str::contains("Surplus"));
}

#[test]
fn summary_of_an_unknown_month_is_all_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf8 path");

    cli()
        .args(["summary", "--data-dir", data_dir, "--month", "1999-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 1999"))
        .stdout(predicate::str::contains("$0"));
}

#[test]
fn render_writes_an_svg_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_str().expect("utf8 path");
    let out = dir.path().join("flow.svg");

    cli()
        .args(["demo", "--data-dir", data_dir, "--month", "2026-05"])
        .assert()
        .success();

    cli()
        .args([
            "render",
            "--data-dir",
            data_dir,
            "--month",
            "2026-05",
            "--out",
            out.to_str().expect("utf8 path"),
            "--width",
            "900",
            "--height",
            "540",
            "--light",
        ])
        .assert()
        .success();

    let svg = std::fs::read_to_string(&out).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Salary"));
    assert!(svg.contains("</svg>"));
}

#[test]
fn invalid_month_flag_is_rejected() {
    cli()
        .args(["summary", "--month", "not-a-month"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid reference"));
}
