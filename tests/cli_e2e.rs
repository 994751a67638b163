//! End-to-end CLI tests for the catalog binary.
//!
//! Each test points `XDG_CONFIG_HOME` at a scratch directory so the user's
//! real config and stored theme never leak in.

#![allow(deprecated)] // assert_cmd::Command::cargo_bin

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"[
  {"slug":"codex-atlas","title":"CODEX Atlas","type":"codex","tags":["human"],
   "citation":"Smith et al. 2023","r2_path":"/viewers/codex-atlas.html",
   "thumbnail":"thumbs/codex-atlas.jpg"},
  {"slug":"mouse-brain","title":"Mouse Brain","type":"xenium",
   "r2_path":"viewers/mouse-brain.html"},
  {"title":"No Slug"}
]"#;

struct Fixture {
    site: TempDir,
    config: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let site = TempDir::new().unwrap();
        std::fs::write(site.path().join("datasets.json"), MANIFEST).unwrap();
        Self {
            site,
            config: TempDir::new().unwrap(),
        }
    }

    fn site(&self) -> &Path {
        self.site.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("catalog").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_binary_help_displays_usage() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse, filter and render"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_search_lists_every_dataset() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["--viewer-host", "viewers.example.com", "search"])
        .arg(fixture.site())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 datasets shown"))
        .stdout(predicate::str::contains(
            "CODEX Atlas\t[codex]\thttps://viewers.example.com/viewers/codex-atlas.html",
        ))
        .stdout(predicate::str::contains("No Slug\t[unknown]"));
}

#[test]
fn test_search_filters_case_insensitively() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("search")
        .arg(fixture.site())
        .arg("  MOUSE ")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 dataset shown"))
        .stdout(predicate::str::contains("Mouse Brain"))
        .stdout(predicate::str::contains("CODEX Atlas").not());
}

#[test]
fn test_search_no_match_prints_empty_state() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("search")
        .arg(fixture.site())
        .arg("codx")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 datasets shown"))
        .stdout(predicate::str::contains("No datasets match your search."));
}

#[test]
fn test_search_minimal_index_ignores_citation() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["--minimal-index", "search"])
        .arg(fixture.site())
        .arg("smith")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 datasets shown"));
}

#[test]
fn test_search_missing_manifest_reports_load_failure() {
    let empty = TempDir::new().unwrap();
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("search")
        .arg(empty.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Unable to load datasets"))
        .stdout(predicate::str::contains("datasets shown").not());
}

#[test]
fn test_search_with_query_after_failed_load_keeps_failure() {
    let empty = TempDir::new().unwrap();
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("search")
        .arg(empty.path())
        .arg("atlas")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unable to load datasets"))
        .stdout(predicate::str::contains("No datasets match").not())
        .stdout(predicate::str::contains("datasets shown").not());
}

#[test]
fn test_search_non_array_manifest_reports_format_error() {
    let fixture = Fixture::new();
    std::fs::write(fixture.site().join("datasets.json"), r#"{"datasets":[]}"#).unwrap();
    fixture
        .cmd()
        .arg("search")
        .arg(fixture.site())
        .assert()
        .success()
        .stdout(predicate::str::contains("must be a JSON array"));
}

#[test]
fn test_render_writes_html_page() {
    let fixture = Fixture::new();
    let out = fixture.config.path().join("index.html");

    fixture
        .cmd()
        .args(["render", "--theme", "dark", "--query", "atlas", "-o"])
        .arg(&out)
        .arg(fixture.site())
        .assert()
        .success();

    let page = std::fs::read_to_string(&out).unwrap();
    assert!(page.contains(r#"data-theme="dark""#));
    assert!(page.contains("CODEX Atlas"));
    assert!(!page.contains("Mouse Brain"));
    assert!(page.contains("./thumbs/codex-atlas.jpg"));
    assert!(page.contains(r#"role="link""#));
    assert!(page.contains("<script>"));
}

#[test]
fn test_render_without_thumbnails_omits_images() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["--no-thumbnails", "render"])
        .arg(fixture.site())
        .assert()
        .success()
        .stdout(predicate::str::contains("<img").not())
        .stdout(predicate::str::contains(
            r#"<p id="result-count">3 datasets shown</p>"#,
        ));
}

#[test]
fn test_thumbs_plans_and_skips() {
    let fixture = Fixture::new();
    let out_dir = fixture.site().join("thumbs");

    fixture
        .cmd()
        .arg("thumbs")
        .arg(fixture.site())
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--manifest-dir")
        .arg(fixture.site())
        .assert()
        .success()
        .stdout(predicate::str::contains("Datasets selected: 2"))
        .stdout(predicate::str::contains("PLAN codex-atlas"))
        .stdout(predicate::str::contains("thumbnail=thumbs/codex-atlas.jpg"))
        .stdout(predicate::str::contains("SKIP entry #2: missing slug"));
}

#[test]
fn test_thumbs_existing_image_needs_overwrite() {
    let fixture = Fixture::new();
    let out_dir = fixture.site().join("thumbs");
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(out_dir.join("codex-atlas.jpg"), b"jpeg").unwrap();

    let run = |overwrite: bool| {
        let mut cmd = fixture.cmd();
        cmd.arg("thumbs")
            .arg(fixture.site())
            .arg("--output-dir")
            .arg(&out_dir)
            .arg("--manifest-dir")
            .arg(fixture.site());
        if overwrite {
            cmd.arg("--overwrite");
        }
        cmd.assert().success()
    };

    run(false)
        .stdout(predicate::str::contains("SKIP (exists) codex-atlas"))
        .stdout(predicate::str::contains("PLAN mouse-brain"));
    run(true).stdout(predicate::str::contains("PLAN codex-atlas"));
}

#[test]
fn test_thumbs_manifest_dir_with_parent_segment() {
    let fixture = Fixture::new();
    let nested = fixture.site().join("nested");
    std::fs::create_dir_all(&nested).unwrap();

    fixture
        .cmd()
        .arg("thumbs")
        .arg(fixture.site())
        .arg("--output-dir")
        .arg(fixture.site().join("thumbs"))
        .arg("--manifest-dir")
        .arg(nested.join(".."))
        .assert()
        .success()
        .stdout(predicate::str::contains("thumbnail=thumbs/codex-atlas.jpg"));
}

#[test]
fn test_thumbs_unknown_slug_fails() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("thumbs")
        .arg(fixture.site())
        .args(["--slugs", "does-not-exist"])
        .assert()
        .failure();
}

#[test]
fn test_theme_toggle_persists() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .arg("theme")
        .assert()
        .success()
        .stdout("light\n");
    fixture
        .cmd()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("dark\n");
    fixture
        .cmd()
        .arg("theme")
        .assert()
        .success()
        .stdout("dark\n");
}

#[test]
fn test_config_file_sets_viewer_host() {
    let fixture = Fixture::new();
    let dir = fixture.config.path().join("karospace-catalog");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "viewer_host = \"https://viewers.test.org/\"\n",
    )
    .unwrap();

    fixture
        .cmd()
        .arg("search")
        .arg(fixture.site())
        .arg("mouse")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://viewers.test.org/viewers/mouse-brain.html",
        ));
}

#[test]
fn test_config_file_unknown_key_fails() {
    let fixture = Fixture::new();
    let dir = fixture.config.path().join("karospace-catalog");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "colour = \"blue\"\n").unwrap();

    fixture
        .cmd()
        .arg("search")
        .arg(fixture.site())
        .assert()
        .failure();
}
