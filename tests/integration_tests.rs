use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with its log file kept inside `dir`.
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tabtint");
    cmd.arg("--log-file").arg(dir.path().join("tabtint.log"));
    cmd
}

#[test]
fn test_cli_palette_yaml() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("palette")
        .assert()
        .success()
        .stdout(predicate::str::contains("tab: plan"))
        .stdout(predicate::str::contains("tab: outcome"))
        .stdout(predicate::str::contains("hsl(237, 49%, 76%)"))
        .stdout(predicate::str::contains("hsl(177, 49%, 76%)"));
}

#[test]
fn test_cli_palette_css() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["palette", "--format", "css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#tab-task1 {"))
        .stdout(predicate::str::contains(
            "--active-color-hover-bg: hsl(222, 49%, 76%, 0.1);",
        ));
}

#[test]
fn test_cli_palette_custom_count_and_step() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["palette", "--count", "3", "--step", "90", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"h\": 237"))
        .stdout(predicate::str::contains("\"h\": 327"))
        .stdout(predicate::str::contains("\"h\": 57"));
}

#[test]
fn test_cli_palette_negative_step() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["palette", "--base", "#ff0000", "--step", "-120", "--format", "css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hsl(240, 100%, 50%)"));
}

#[test]
fn test_cli_palette_rejects_bad_colour() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["palette", "--base", "definitely-not-a-colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color"));
}

#[test]
fn test_cli_simulate_events() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["simulate", "tab:task1", "next", "wait:5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active_tab: task1"))
        .stdout(predicate::str::contains("wait:5000"))
        .stdout(predicate::str::contains("at_ms: 5000"));
}

#[test]
fn test_cli_simulate_trace_prints_every_step() {
    let dir = TempDir::new().unwrap();
    let output = cmd(&dir)
        .args(["simulate", "--trace", "tab:outcome", "scroll:left"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("---\n").count(), 3);
}

#[test]
fn test_cli_simulate_script() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("events.txt");
    std::fs::write(&script, "# open the results\ntab:outcome\ngoto:-1\n").unwrap();

    cmd(&dir)
        .arg("simulate")
        .arg("--script")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("active_tab: outcome"));
}

#[test]
fn test_cli_simulate_rejects_bad_event() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["simulate", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event"));
}

#[test]
fn test_cli_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("page.toml");
    std::fs::write(&config, "[palette]\nbase = \"#ff0000\"\nhue_step = 60\n").unwrap();

    cmd(&dir)
        .arg("--config")
        .arg(&config)
        .args(["palette", "--format", "css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hsl(0, 100%, 50%)"))
        .stdout(predicate::str::contains("hsl(240, 100%, 50%)"));
}

#[test]
fn test_cli_completions() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tabtint"));
}

#[test]
fn test_cli_simulate_initial_tab() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["simulate", "--initial", "task3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active_tab: task3"))
        .stdout(predicate::str::contains("event: load"));
}

#[test]
fn test_cli_palette_count_is_bounded() {
    let dir = TempDir::new().unwrap();
    for count in ["0", "361", "18446744073709551615"] {
        cmd(&dir)
            .args(["palette", "--count", count])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--count"));
    }
    cmd(&dir)
        .args(["palette", "--count", "360", "--format", "json"])
        .assert()
        .success();
}

#[test]
fn test_cli_zero_interval_is_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("TABTINT_CAROUSEL__INTERVAL_MS", "0")
        .args(["simulate", "wait:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_ms"));
}

#[test]
fn test_cli_simulate_very_long_wait() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["simulate", "wait:18446744073709551615"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("at_ms: 18446744073709551615"));
}

#[test]
fn test_cli_log_level_flag() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--log-level", "debug", "simulate", "next"])
        .assert()
        .success();
    let log = std::fs::read_to_string(dir.path().join("tabtint.log")).unwrap();
    assert!(log.contains("Page loaded"), "{log}");
    assert!(log.contains("Carousel created"), "{log}");

    cmd(&dir)
        .args(["--log-level", "loud", "palette"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}
