use assert_cmd::Command;
use predicates::prelude::*;

const TOKEN: &str = "d555981b-e6af-4ea9-9eb2-e47cfbc3edfa";

struct TestCase {
    data_dir: tempfile::TempDir,
}

impl TestCase {
    fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().unwrap(),
        }
    }

    fn with_settings(self, content: &str) -> Self {
        std::fs::write(self.data_dir.path().join("settings.json"), content).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("theme-apply").unwrap();
        cmd.env("THEME_APPLY_DATA_DIR", self.data_dir.path())
            .env_remove("THEME_APPLY_API_URL")
            .env_remove("THEME_APPLY_ADB")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn link() -> String {
    format!("http://zhuti.xiaomi.com/detail/{TOKEN}")
}

#[test]
fn test_resolve_malformed_link() {
    let test = TestCase::new();
    test.cmd()
        .args(["resolve", "http://zhuti.xiaomi.com/theme/123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not contain '/detail/'"));
}

#[test]
fn test_resolve_prints_theme_info() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", format!("/thm/download/v2/{TOKEN}").as_str())
        .match_query(mockito::Matcher::UrlEncoded("miuiUIVersion".into(), "V11".into()))
        .with_status(200)
        .with_body(
            r#"{"apiCode":0,"apiData":{"downloadUrl":"http%3A%2F%2Ff8.market.xiaomi.com%2Fdownload%2FClassic.mtz","fileHash":"","fileSize":2500000}}"#,
        )
        .create();

    let test = TestCase::new();
    test.cmd()
        .args(["resolve", &link(), "--format", "json", "--locale", "en"])
        .args(["--api-url", &format!("{}/thm/download/v2/", server.url())])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""file_name":"Classic.mtz""#))
        .stdout(predicate::str::contains(r#""file_size":"2.50 MB""#))
        .stdout(predicate::str::contains(r#""file_hash":"N/A""#))
        .stdout(predicate::str::contains(
            r#""download_url":"http://f8.market.xiaomi.com/download/Classic.mtz""#,
        ));

    mock.assert();
}

#[test]
fn test_resolve_uses_settings_file() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", format!("/api/{TOKEN}").as_str())
        .match_query(mockito::Matcher::UrlEncoded("miuiUIVersion".into(), "V12".into()))
        .with_status(200)
        .with_body(r#"{"apiCode":-1,"apiData":null}"#)
        .create();

    let test = TestCase::new().with_settings(&format!(
        r#"{{ "api_base_url": "{}/api/", "ui_version": "V12" }}"#,
        server.url()
    ));
    test.cmd()
        .args(["resolve", &link()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no data"));

    mock.assert();
}

#[test]
fn test_apply_relative_path() {
    let test = TestCase::new();
    test.cmd()
        .args(["apply", "Download/Classic.mtz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_apply_missing_adb() {
    let test = TestCase::new();
    test.cmd()
        .args(["apply", "/sdcard/Classic.mtz", "--adb", "/nonexistent/adb-for-theme-apply-tests"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to run"));
}

#[test]
fn test_invalid_settings_file() {
    let test = TestCase::new().with_settings("{ not json");
    test.cmd()
        .args(["resolve", &link()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load settings"));
}
