//! Configuration integration tests.
//!
//! Each test builds a throwaway project (a temp dir with `.git`, so discovery
//! stays inside it) and checks that settings change what the binary does:
//! which dictionary it loads, how many rhymes it lists, how it counts.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MOON_DICT: &str = "moon M UW1 N\nspoon S P UW1 N\ntune T UW1 N\njune JH UW1 N\n";

/// A temp project root with its own empty user config directory.
struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::create_dir(tmp.path().join(".xdg")).unwrap();
        Self { tmp }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// The binary, run from `dir` under the project root.
    #[allow(deprecated)]
    fn cmd(&self, dir: &str) -> Command {
        let dir = self.root().join(dir);
        fs::create_dir_all(&dir).unwrap();
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        cmd.env("XDG_CONFIG_HOME", self.root().join(".xdg"))
            .env_remove("VERSEKIT_DICTIONARY")
            .env_remove("VERSEKIT_SYLLABLE_MODE")
            .env_remove("VERSEKIT_RHYME_LIMIT")
            .args(["-C", dir.to_str().unwrap()]);
        cmd
    }

    fn json(&self, dir: &str, args: &[&str]) -> Value {
        let output = self
            .cmd(dir)
            .arg("--json")
            .args(args)
            .output()
            .expect("failed to run command");
        assert!(
            output.status.success(),
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("invalid JSON output")
    }
}

fn rhymes(json: &Value) -> Vec<&str> {
    json["rhymes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap())
        .collect()
}

// =============================================================================
// Dictionary selection
// =============================================================================

#[test]
fn bundled_dictionary_without_config() {
    let project = Project::new();
    let json = project.json("", &["info"]);

    assert_eq!(json["dictionary"]["origin"], "bundled");
    assert_eq!(json["config"]["syllable_mode"], "auto");
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn project_dictionary_is_found_from_subdirectory() {
    let project = Project::new();
    project.write("lexicon/moon.dict", MOON_DICT);
    project.write(".verse.toml", "dictionary = \"lexicon/moon.dict\"\n");

    // Relative to the config file, not to the working directory.
    let json = project.json("album/side-a", &["rhymes", "moon"]);
    assert_eq!(rhymes(&json), ["spoon", "tune", "june"]);

    let info = project.json("album/side-a", &["info"]);
    assert_eq!(info["dictionary"]["words"], 4);
    assert!(
        info["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".verse.toml")
    );
}

#[test]
fn dictionary_flag_beats_config() {
    let project = Project::new();
    let flagged = project.write("moon.dict", MOON_DICT);
    project.write("versekit.toml", "dictionary = \"missing.dict\"\n");

    let json = project.json(
        "",
        &["--dictionary", flagged.to_str().unwrap(), "rhymes", "tune"],
    );
    assert_eq!(rhymes(&json), ["moon", "spoon", "june"]);
}

#[test]
fn dictionary_from_environment_beats_config() {
    let project = Project::new();
    project.write("moon.dict", MOON_DICT);
    project.write("versekit.toml", "dictionary = \"missing.dict\"\n");

    let output = project
        .cmd("")
        .env("VERSEKIT_DICTIONARY", "moon.dict")
        .args(["--json", "info"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dictionary"]["words"], 4);
}

#[test]
fn missing_configured_dictionary_fails() {
    let project = Project::new();
    project.write(".versekit.toml", "dictionary = \"nowhere.dict\"\n");

    project
        .cmd("")
        .args(["rhymes", "time"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load pronunciation dictionary"))
        .stderr(predicate::str::contains("nowhere.dict"));
}

#[test]
fn dictionary_without_entries_fails() {
    let project = Project::new();
    project.write("empty.dict", ";;; nothing but comments\n\n");
    project.write(".versekit.toml", "dictionary = \"empty.dict\"\n");

    project
        .cmd("")
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no usable entries"));
}

// =============================================================================
// Query defaults
// =============================================================================

#[test]
fn rhyme_limit_from_each_format() {
    for (name, contents) in [
        ("versekit.toml", "rhyme_limit = 2\n"),
        ("versekit.yaml", "rhyme_limit: 2\n"),
        ("versekit.yml", "rhyme_limit: 2\n"),
        ("versekit.json", r#"{"rhyme_limit": 2}"#),
    ] {
        let project = Project::new();
        project.write(name, contents);

        let json = project.json("", &["rhymes", "time"]);
        assert_eq!(rhymes(&json).len(), 2, "{name}");
        assert!(json["total"].as_u64().unwrap() > 2, "{name}");
    }
}

#[test]
fn limit_flag_beats_configured_limit() {
    let project = Project::new();
    project.write(".versekit.toml", "rhyme_limit = 1\n");

    let json = project.json("", &["rhymes", "time", "--limit", "3"]);
    assert_eq!(rhymes(&json).len(), 3);
}

#[test]
fn configured_estimate_mode_skips_dictionary() {
    let project = Project::new();
    project.write("verse.yaml", "syllable_mode: estimate\n");

    let json = project.json("", &["syllables", "banana"]);
    assert_eq!(json[0]["source"], "estimate");

    let json = project.json("", &["syllables", "banana", "--mode", "auto"]);
    assert_eq!(json[0]["source"], "dictionary");
    assert_eq!(json[0]["syllables"], 3);
}

#[test]
fn environment_mode_beats_file_mode() {
    let project = Project::new();
    project.write("verse.yaml", "syllable_mode: estimate\n");

    let output = project
        .cmd("")
        .env("VERSEKIT_SYLLABLE_MODE", "auto")
        .args(["--json", "syllables", "cat"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["source"], "dictionary");
}

#[test]
fn nearer_config_shadows_project_root() {
    let project = Project::new();
    project.write("versekit.toml", "rhyme_limit = 1\nsyllable_mode = \"estimate\"\n");
    project.write("ballads/.verse.toml", "rhyme_limit = 2\n");

    let json = project.json("ballads", &["info"]);
    assert_eq!(json["config"]["rhyme_limit"], 2);
    // Only the nearest directory is merged.
    assert_eq!(json["config"]["syllable_mode"], "auto");
}

#[test]
fn explicit_config_overrides_discovered() {
    let project = Project::new();
    project.write(".versekit.toml", "rhyme_limit = 1\n");
    let explicit = project.write("tour/override.yaml", "rhyme_limit: 4\n");

    let json = project.json(
        "",
        &["--config", explicit.to_str().unwrap(), "rhymes", "ocean"],
    );
    assert_eq!(rhymes(&json).len(), 4);

    let info = project.json("", &["--config", explicit.to_str().unwrap(), "info"]);
    assert_eq!(info["config"]["rhyme_limit"], 4);
    assert!(
        info["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("override.yaml")
    );
}

#[test]
fn config_outside_repository_is_ignored() {
    let project = Project::new();
    project.write("versekit.toml", "rhyme_limit = 1\n");
    fs::create_dir_all(project.root().join("vendor/songbook/.git")).unwrap();

    let json = project.json("vendor/songbook/lyrics", &["info"]);
    assert!(json["config"]["rhyme_limit"].is_null());
    assert!(json["config"]["config_file"].is_null());
}

// =============================================================================
// Input limits
// =============================================================================

#[test]
fn max_input_bytes_rejects_large_lyrics() {
    let project = Project::new();
    project.write(".versekit.toml", "max_input_bytes = 16\n");
    project.write("song.txt", "the time is now and the rhyme is mine\n");

    project
        .cmd("")
        .args(["lines", "song.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disabled_limit_accepts_large_lyrics() {
    let project = Project::new();
    project.write(
        ".versekit.toml",
        "max_input_bytes = 16\ndisable_input_limit = true\n",
    );
    project.write("song.txt", "the time is now and the rhyme is mine\n");

    let json = project.json("", &["lines", "song.txt"]);
    assert_eq!(json["lines"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_config_syntax_fails() {
    for (name, contents) in [
        (".versekit.toml", "rhyme_limit = [[["),
        (".versekit.yaml", "rhyme_limit:\n  - [broken"),
        (".versekit.json", "{rhyme_limit: }"),
    ] {
        let project = Project::new();
        project.write(name, contents);

        project
            .cmd("")
            .arg("info")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

#[test]
fn unknown_syllable_mode_fails() {
    let project = Project::new();
    project.write(".versekit.toml", "syllable_mode = \"vibes\"\n");

    project
        .cmd("")
        .args(["syllables", "cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn unknown_keys_are_ignored() {
    let project = Project::new();
    project.write(".versekit.toml", "rhyme_limit = 2\nmeter = \"iambic\"\n");

    let json = project.json("", &["info"]);
    assert_eq!(json["config"]["rhyme_limit"], 2);
}
