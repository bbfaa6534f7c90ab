use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use tempfile::{TempDir, tempdir};

const ENDPOINTS: [&str; 3] = ["tracks", "users", "listen_history"];

/// `strata` with a scratch data dir and log file, isolated from the caller's env.
fn strata(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("strata"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("STRATA_BASE_URL")
        .env_remove("STRATA_ENDPOINTS")
        .env_remove("STRATA_DATA_DIR")
        .env_remove("STRATA_LOG_FILE")
        .env_remove("STRATA_LOG_LEVEL")
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--log-file")
        .arg(dir.path().join("pipeline.log"));
    cmd
}

/// The `<endpoint>: <path>` lines, skipping interleaved log output.
fn snapshot_lines(stdout: &[u8]) -> Vec<(String, PathBuf)> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| {
            let (endpoint, path) = line.split_once(": ")?;
            ENDPOINTS
                .contains(&endpoint)
                .then(|| (endpoint.to_string(), PathBuf::from(path)))
        })
        .collect()
}

fn serve<'a>(server: &'a MockServer, endpoint: &str, status: u16, body: &str) -> httpmock::Mock<'a> {
    let path = format!("/{endpoint}");
    let body = body.to_string();
    server.mock(move |when, then| {
        when.method("GET").path(path);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

fn log_text(dir: &Path) -> String { fs::read_to_string(dir.join("pipeline.log")).unwrap() }

#[test]
fn run_prints_one_line_per_snapshot() {
    let server = MockServer::start();
    let mocks = [
        serve(&server, "tracks", 200, r#"[{"id": 1}]"#),
        serve(&server, "users", 200, r#"[{"id": 7}]"#),
        serve(&server, "listen_history", 200, r#"{"events": []}"#),
    ];
    let dir = tempdir().unwrap();

    let assert = strata(&dir)
        .arg("run")
        .arg("--base-url")
        .arg(server.base_url())
        .arg("--backoff-ms")
        .arg("0")
        .assert()
        .success();

    let lines = snapshot_lines(&assert.get_output().stdout);
    let endpoints: Vec<&str> = lines.iter().map(|(e, _)| e.as_str()).collect();
    assert_eq!(endpoints, ENDPOINTS);
    for (_, path) in &lines {
        assert!(path.starts_with(dir.path().join("data")));
        assert!(path.is_file());
    }
    for mock in &mocks {
        mock.assert_hits(1);
    }
    assert!(log_text(dir.path()).contains("INFO"));

    // `latest` finds what `run` just wrote
    let assert = strata(&dir).arg("latest").arg("users").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.lines().any(|l| Path::new(l) == lines[1].1));
}

#[test]
fn run_fails_after_logging_and_keeps_earlier_snapshots() {
    let server = MockServer::start();
    let tracks = serve(&server, "tracks", 200, "[1, 2, 3]");
    let users = serve(&server, "users", 404, "");
    let history = serve(&server, "listen_history", 200, "[]");
    let dir = tempdir().unwrap();

    let assert = strata(&dir)
        .env("STRATA_BASE_URL", server.base_url())
        .assert()
        .failure();

    let lines = snapshot_lines(&assert.get_output().stdout);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, "tracks");
    assert!(lines[0].1.is_file());

    tracks.assert_hits(1);
    users.assert_hits(1);
    history.assert_hits(0);

    let log = log_text(dir.path());
    assert!(log.contains("ERROR"));
    assert!(log.contains("fetching users failed"));
}

#[test]
fn latest_without_snapshots_fails() {
    let dir = tempdir().unwrap();

    strata(&dir)
        .arg("latest")
        .arg("tracks")
        .assert()
        .failure()
        .stdout(contains("no snapshots for tracks"));

    assert!(log_text(dir.path()).contains("ERROR"));
}
