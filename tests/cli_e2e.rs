//! End-to-end CLI tests for the snaplink binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a command with settings isolated to a temp config dir and no
/// terminal background hint leaking in from the host environment.
fn snaplink(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("snaplink").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_dir.path())
        .env_remove("COLORFGBG")
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let config = TempDir::new().unwrap();
    snaplink(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetch direct download links"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let config = TempDir::new().unwrap();
    snaplink(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("snaplink"));
}

/// Test that an unknown platform is rejected as a usage error.
#[test]
fn test_binary_rejects_unknown_platform() {
    let config = TempDir::new().unwrap();
    snaplink(&config)
        .args(["--platform", "vimeo", "https://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("vimeo"));
}

/// Test that fetching without --platform explains what is missing.
#[test]
fn test_binary_requires_platform_for_fetch() {
    let config = TempDir::new().unwrap();
    snaplink(&config)
        .arg("https://www.tiktok.com/@u/video/1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--platform is required"));
}

/// Test that a link for the wrong platform exits 2 with the validation reason.
#[test]
fn test_binary_validation_failure_exit_code_and_message() {
    let config = TempDir::new().unwrap();
    snaplink(&config)
        .args(["--platform", "tiktok", "https://example.com/clip"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "URL does not look like a valid tiktok link.",
        ));
}

/// Test that a missing URL argument surfaces the canonical validator message.
#[test]
fn test_binary_missing_url_shows_url_required() {
    let config = TempDir::new().unwrap();
    snaplink(&config)
        .args(["--platform", "tiktok"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("URL required."));
}

/// Test the theme subcommand: defaults to light, selection persists across
/// invocations.
#[test]
fn test_theme_select_round_trip() {
    let config = TempDir::new().unwrap();

    snaplink(&config)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));

    snaplink(&config)
        .args(["theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));

    snaplink(&config)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

/// Test that the dark terminal background hint drives the default theme but
/// persists nothing.
#[test]
fn test_theme_defaults_to_dark_background_hint() {
    let config = TempDir::new().unwrap();

    snaplink(&config)
        .arg("theme")
        .env("COLORFGBG", "15;0")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));

    // Nothing persisted: without the hint the default is light again.
    snaplink(&config)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));
}

/// Full fetch against a mock download API via --api-base.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_fetches_options_from_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tiktok"))
        .and(query_param("url", "https://www.tiktok.com/@u/video/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "result": {
                "video_hd": "https://cdn/hd.mp4",
                "mp3": "https://cdn/audio.mp3"
            }
        })))
        .mount(&server)
        .await;

    let config = TempDir::new().unwrap();
    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        snaplink(&config)
            .args([
                "--api-base",
                &uri,
                "--platform",
                "tiktok",
                "https://www.tiktok.com/@u/video/1",
            ])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Download Video (HD)"))
        .stdout(predicate::str::contains("https://cdn/hd.mp4"))
        .stdout(predicate::str::contains("Download Audio (MP3)"));
}

/// JSON output mode emits the normalized options for scripting.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ytdl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "result": {"video": "https://cdn/v.mp4"}
        })))
        .mount(&server)
        .await;

    let config = TempDir::new().unwrap();
    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        snaplink(&config)
            .args([
                "--api-base",
                &uri,
                "--platform",
                "youtube",
                "--json",
                "https://youtu.be/abc",
            ])
            .assert()
    })
    .await
    .unwrap();

    let output = assert.success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["options"][0]["label"], "Download Video");
    assert_eq!(parsed["options"][0]["icon"], "video");
    assert_eq!(parsed["info"], serde_json::Value::Null);
}

/// An API failure envelope exits non-zero with the server's message.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_api_failure_message_and_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instagram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": false,
            "message": "Post not found."
        })))
        .mount(&server)
        .await;

    let config = TempDir::new().unwrap();
    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        snaplink(&config)
            .args([
                "--api-base",
                &uri,
                "--platform",
                "instagram",
                "https://www.instagram.com/p/abc/",
            ])
            .assert()
    })
    .await
    .unwrap();

    assert
        .code(1)
        .stderr(predicate::str::contains("Post not found."));
}
