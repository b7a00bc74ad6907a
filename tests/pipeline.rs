//! Integration tests for manifest generation
//!
//! These tests run the full scan, build, sort and write pipeline against
//! temporary release directories and check the manifest that comes out.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

use firmware_manifest::app::{
    Digester, ErrorPolicy, GeneratorConfig, GitHistory, HistoryBackend, ManifestGenerator,
    NativeDigester, NoHistory, ReleaseHistory, Sha256Hash,
};
use firmware_manifest::errors::{DigestError, DigestResult, HistoryResult};

/// History with fixed dates per filename; unknown files have no history
struct FixedHistory(HashMap<&'static str, &'static str>);

#[async_trait]
impl ReleaseHistory for FixedHistory {
    async fn release_date(&self, _dir: &Path, name: &str) -> HistoryResult<Option<String>> {
        Ok(Some(self.0.get(name).copied().unwrap_or_default().to_string()))
    }
}

/// Native hashing, except for the 1.1 release which always fails
struct FlakyDigester;

#[async_trait]
impl Digester for FlakyDigester {
    async fn digest(&self, path: &Path) -> DigestResult<Sha256Hash> {
        if path.ends_with("hp100-firmware-v1.1.hex") {
            return Err(DigestError::CommandFailed {
                command: "flaky".to_string(),
                path: path.to_path_buf(),
                stderr: "read error".to_string(),
            });
        }
        NativeDigester::new().digest(path).await
    }
}

fn write_files(dir: &Path, files: &[(&str, &[u8])]) {
    for (name, content) in files {
        std::fs::write(dir.join(name), content).unwrap();
    }
}

fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

fn read_manifest(dir: &Path) -> Value {
    let text = std::fs::read_to_string(dir.join("manifest.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn release_keys(manifest: &Value) -> Vec<String> {
    // serde_json::Map is sorted here; release order is checked on the raw text
    manifest["releases"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect()
}

fn config_for(dir: &Path) -> GeneratorConfig {
    GeneratorConfig::default()
        .with_release_dir(dir)
        .with_history_backend(HistoryBackend::None)
}

#[tokio::test]
async fn test_generates_sorted_manifest() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("hp100-firmware-v1.2.hex", b"one-two"),
            ("hp100-firmware-v1.10.hex", b"one-ten"),
            ("hp100-firmware-v2.0.hex", b"two-zero"),
            ("hp100-firmware-v1.2.hex.bak", b"backup"),
            ("notes.txt", b"ignore me"),
            ("manifest.json", b"{\"stale\": true}"),
        ],
    );

    let generator = ManifestGenerator::new(config_for(temp_dir.path())).unwrap();
    let report = generator.run().await.unwrap();

    assert_eq!(report.releases, 3);
    assert_eq!(report.latest_version.as_deref(), Some("2.0"));
    assert_eq!(report.ignored_entries, 3);
    assert!(report.skipped.is_empty());
    assert_eq!(report.manifest_path, temp_dir.path().join("manifest.json"));

    let text = std::fs::read_to_string(temp_dir.path().join("manifest.json")).unwrap();
    let first = text.find("\"2.0\"").unwrap();
    let second = text.find("\"1.10\"").unwrap();
    let third = text.find("\"1.2\"").unwrap();
    assert!(first < second && second < third, "releases not newest first:\n{}", text);

    let manifest = read_manifest(temp_dir.path());
    assert!(manifest.get("stale").is_none());
    assert!(manifest.get("latestRelease").is_none());

    let mut keys = release_keys(&manifest);
    keys.sort();
    assert_eq!(keys, vec!["1.10", "1.2", "2.0"]);

    let release = &manifest["releases"]["1.10"];
    assert_eq!(release["name"], "hp100-firmware-v1.10.hex");
    assert_eq!(release["version"], "1.10");
    assert_eq!(
        release["url"],
        "https://firmware.example.com/hp100/hp100-firmware-v1.10.hex"
    );
    assert_eq!(release["sha256"], sha256_hex(b"one-ten"));
    assert_eq!(release["supports"][0]["model"], "HP100");
    assert_eq!(release["supports"][0]["version"], "1.0");
    assert!(release.get("releaseDate").is_none());
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("hp100-firmware-v0.9.hex", b"a"),
            ("hp100-firmware-v1.0.hex", b"b"),
        ],
    );

    let generator = ManifestGenerator::new(config_for(temp_dir.path())).unwrap();
    generator.run().await.unwrap();
    let first = std::fs::read(temp_dir.path().join("manifest.json")).unwrap();

    generator.run().await.unwrap();
    let second = std::fs::read(temp_dir.path().join("manifest.json")).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_degenerate_versions_are_kept() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("hp100-firmware-v.hex", b"empty"),
            ("hp100-firmware-v1..hex", b"trailing"),
            ("hp100-firmware-v1..2.hex", b"double"),
        ],
    );

    let generator = ManifestGenerator::new(config_for(temp_dir.path())).unwrap();
    generator.run().await.unwrap();

    let manifest = read_manifest(temp_dir.path());
    let mut keys = release_keys(&manifest);
    keys.sort();
    assert_eq!(keys, vec!["", "1.", "1..2"]);
    assert_eq!(manifest["releases"][""]["name"], "hp100-firmware-v.hex");
    assert_eq!(manifest["releases"]["1..2"]["version"], "1..2");
}

#[tokio::test]
async fn test_duplicate_version_later_file_wins() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("hp100-firmware-v1.0.hex", b"hex build"),
            ("hp100-firmware-v1.0.bin", b"bin build"),
        ],
    );
    let config = GeneratorConfig {
        binary_extensions: vec![".hex".to_string(), ".bin".to_string()],
        ..config_for(temp_dir.path())
    };
    let generator = ManifestGenerator::new(config).unwrap();

    let report = generator
        .run_with_names(vec![
            "hp100-firmware-v1.0.hex".to_string(),
            "hp100-firmware-v1.0.bin".to_string(),
        ])
        .await
        .unwrap();
    assert_eq!(report.releases, 1);
    let manifest = read_manifest(temp_dir.path());
    assert_eq!(manifest["releases"]["1.0"]["name"], "hp100-firmware-v1.0.bin");
    assert_eq!(manifest["releases"]["1.0"]["sha256"], sha256_hex(b"bin build"));

    generator
        .run_with_names(vec![
            "hp100-firmware-v1.0.bin".to_string(),
            "hp100-firmware-v1.0.hex".to_string(),
        ])
        .await
        .unwrap();
    let manifest = read_manifest(temp_dir.path());
    assert_eq!(manifest["releases"]["1.0"]["name"], "hp100-firmware-v1.0.hex");
}

#[tokio::test]
async fn test_release_dates_and_latest_release() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("hp100-firmware-v1.0.hex", b"old"),
            ("hp100-firmware-v1.1.hex", b"new"),
        ],
    );
    let history = FixedHistory(HashMap::from([("hp100-firmware-v1.0.hex", "2020-01-15")]));
    let config = GeneratorConfig {
        include_latest_release: true,
        ..config_for(temp_dir.path())
    };

    let generator = ManifestGenerator::with_components(
        config,
        Arc::new(NativeDigester::new()),
        Arc::new(history),
    )
    .unwrap();
    generator.run().await.unwrap();

    let manifest = read_manifest(temp_dir.path());
    assert_eq!(manifest["latestRelease"], "1.1");
    assert_eq!(manifest["releases"]["1.0"]["releaseDate"], "2020-01-15");
    assert_eq!(manifest["releases"]["1.1"]["releaseDate"], "");
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_files(temp_dir.path(), &[("hp100-firmware-v3.0.hex", b"fw")]);

    let generator =
        ManifestGenerator::new(config_for(temp_dir.path()).with_dry_run(true)).unwrap();
    let report = generator.run().await.unwrap();

    assert!(!report.was_written());
    assert!(!temp_dir.path().join("manifest.json").exists());
    let rendered: Value = serde_json::from_str(report.dry_run_output.as_deref().unwrap()).unwrap();
    assert_eq!(rendered["releases"]["3.0"]["sha256"], sha256_hex(b"fw"));
}

#[tokio::test]
async fn test_failure_policies() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("hp100-firmware-v1.0.hex", b"good"),
            ("hp100-firmware-v1.1.hex", b"unreadable"),
        ],
    );
    let config = config_for(temp_dir.path());

    let abort = ManifestGenerator::with_components(
        config.clone(),
        Arc::new(FlakyDigester),
        Arc::new(NoHistory),
    )
    .unwrap();
    let err = abort.run().await.unwrap_err();
    assert!(err.to_string().contains("hp100-firmware-v1.1.hex"));
    assert!(!temp_dir.path().join("manifest.json").exists());

    let skip = ManifestGenerator::with_components(
        config.with_error_policy(ErrorPolicy::Skip),
        Arc::new(FlakyDigester),
        Arc::new(NoHistory),
    )
    .unwrap();
    let report = skip.run().await.unwrap();
    assert_eq!(report.releases, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "hp100-firmware-v1.1.hex");

    let manifest = read_manifest(temp_dir.path());
    assert_eq!(release_keys(&manifest), vec!["1.0"]);
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Release Bot", "-c", "user.email=release@example.com"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", "2021-03-04T10:00:00+00:00")
        .env("GIT_COMMITTER_DATE", "2021-03-04T10:00:00+00:00")
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

#[tokio::test]
async fn test_git_history_release_date() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    git(temp_dir.path(), &["init", "--quiet"]);
    write_files(temp_dir.path(), &[("hp100-firmware-v1.0.hex", b"committed")]);
    git(temp_dir.path(), &["add", "hp100-firmware-v1.0.hex"]);
    git(temp_dir.path(), &["commit", "--quiet", "-m", "Release 1.0"]);
    write_files(temp_dir.path(), &[("hp100-firmware-v1.1.hex", b"untracked")]);

    let history = GitHistory::new();
    let committed = history
        .release_date(temp_dir.path(), "hp100-firmware-v1.0.hex")
        .await
        .unwrap();
    let untracked = history
        .release_date(temp_dir.path(), "hp100-firmware-v1.1.hex")
        .await
        .unwrap();

    assert_eq!(committed.as_deref(), Some("2021-03-04"));
    assert_eq!(untracked.as_deref(), Some(""));
}
