//! Integration tests for all CLI commands
//!
//! Tests each command with real invocations.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a CLI command
fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sketchgen"))
}

const GO_HELLO: &str = r#"[
    {"kind": "button", "bounding_box": {"x": 0.1, "y": 0.1, "width": 0.3, "height": 0.05}, "label": "Go"},
    {"kind": "text", "bounding_box": {"x": 0.5, "y": 0.11, "width": 0.3, "height": 0.05}, "label": "Hello"}
]"#;

const RAW_OBSERVATIONS: &str = r#"[
    {"label": "cell phone", "confidence": 0.9, "bounding_box": {"x": 0.1, "y": 0.8, "width": 0.3, "height": 0.1}, "origin": "bottom_left", "text": "Submit"},
    {"label": "dog", "confidence": 0.2, "bounding_box": {"x": 0.5, "y": 0.5, "width": 0.3, "height": 0.1}}
]"#;

/// Write `content` to `name` inside `dir`
fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============ GENERATE COMMAND TESTS ============

#[test]
fn test_generate_help() {
    cli()
        .arg("generate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate a Flutter page"));
}

#[test]
fn test_generate_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "home.json", GO_HELLO);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--page-name")
        .arg("HomePage")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "import 'package:flutter/material.dart';",
        ))
        .stdout(predicate::str::contains("class HomePage extends StatefulWidget"))
        .stdout(predicate::str::contains("Expanded("))
        .stderr(predicate::str::contains("2 widgets, 1 rows"));
}

#[test]
fn test_generate_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "home.json", GO_HELLO);
    let output = dir.path().join("lib").join("home_page.dart");

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let source = fs::read_to_string(&output).unwrap();
    assert!(source.contains("class GeneratedPage extends StatefulWidget"));
    assert!(source.contains("child: Text('Go')"));
}

#[test]
fn test_generate_uses_page_name_from_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "login.json",
        r#"{"page_name": "sign in", "detections": []}"#,
    );

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("class Signin extends StatefulWidget"))
        .stdout(predicate::str::contains("children: [],"));
}

#[test]
fn test_generate_raw_observations() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "raw.json", RAW_OBSERVATIONS);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--raw")
        .assert()
        .success()
        .stdout(predicate::str::contains("ElevatedButton("))
        .stdout(predicate::str::contains("child: Text('Submit')"))
        .stderr(predicate::str::contains("1 widgets"));
}

#[test]
fn test_generate_coco_taxonomy_keeps_unknown_as_container() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "raw.json", RAW_OBSERVATIONS);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--taxonomy")
        .arg("coco")
        .arg("--min-confidence")
        .arg("0.1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme.of(context).colorScheme.outline"))
        .stderr(predicate::str::contains("2 widgets"));
}

#[test]
fn test_generate_reads_stdin() {
    let dir = TempDir::new().unwrap();
    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg("-")
        .write_stdin(GO_HELLO)
        .assert()
        .success()
        .stdout(predicate::str::contains("'Hello'"));
}

#[test]
fn test_generate_missing_file() {
    let dir = TempDir::new().unwrap();
    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_generate_invalid_json() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "bad.json", "{not json");

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse detections"));
}

#[test]
fn test_generate_quiet_suppresses_status() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "home.json", GO_HELLO);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============ CONFIG TESTS ============

#[test]
fn test_project_config_is_applied() {
    let dir = TempDir::new().unwrap();
    write_input(
        dir.path(),
        ".sketchgen.toml",
        "[generator]\nrow_gap = 24\npage_padding = 8\n",
    );
    let input = write_input(dir.path(), "home.json", GO_HELLO);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("const SizedBox(height: 24)"))
        .stdout(predicate::str::contains("EdgeInsets.all(8)"));
}

#[test]
fn test_explicit_config_and_strategy_override() {
    let dir = TempDir::new().unwrap();
    let config = write_input(
        dir.path(),
        "custom.toml",
        "[generator]\nrow_strategy = \"drifting_anchor\"\n",
    );
    let diagonal = r#"[
        {"kind": "icon", "bounding_box": {"x": 0.0, "y": 0.0, "width": 0.1, "height": 0.05}},
        {"kind": "icon", "bounding_box": {"x": 0.2, "y": 0.05, "width": 0.1, "height": 0.05}},
        {"kind": "icon", "bounding_box": {"x": 0.4, "y": 0.1, "width": 0.1, "height": 0.05}}
    ]"#;
    let input = write_input(dir.path(), "diag.json", diagonal);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 rows"));

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--strategy")
        .arg("row-anchor")
        .assert()
        .success()
        .stderr(predicate::str::contains("2 rows"));
}

#[test]
fn test_invalid_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_input(dir.path(), "bad.toml", "[generator]\nrow_threshold = 2.0\n");
    let input = write_input(dir.path(), "home.json", GO_HELLO);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config file"));
}

#[test]
fn test_broken_project_config_only_warns() {
    let dir = TempDir::new().unwrap();
    write_input(dir.path(), ".sketchgen.toml", "[generator\n");
    let input = write_input(dir.path(), "home.json", GO_HELLO);

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"));
}

// ============ PREVIEW COMMAND TESTS ============

#[test]
fn test_preview_limit() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "home.json", GO_HELLO);

    cli()
        .current_dir(dir.path())
        .arg("preview")
        .arg(&input)
        .arg("--limit")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("ElevatedButton("))
        .stdout(predicate::str::contains("'Hello'").not())
        .stdout(predicate::str::contains("Scaffold(").not());
}

// ============ CLASSIFY COMMAND TESTS ============

#[test]
fn test_classify_labels() {
    cli()
        .arg("classify")
        .arg("primary_btn")
        .arg("Toggle")
        .arg("giraffe")
        .assert()
        .success()
        .stdout(predicate::str::contains("primary_btn → button"))
        .stdout(predicate::str::contains("Toggle → switch"))
        .stdout(predicate::str::contains("giraffe → unknown"));
}

#[test]
fn test_classify_coco_taxonomy() {
    cli()
        .arg("classify")
        .arg("--taxonomy")
        .arg("coco")
        .arg("tv")
        .arg("giraffe")
        .assert()
        .success()
        .stdout(predicate::str::contains("tv → image"))
        .stdout(predicate::str::contains("giraffe → container"));
}

#[test]
fn test_classify_requires_label() {
    cli().arg("classify").assert().failure();
}

// ============ DEMO COMMAND TESTS ============

#[test]
fn test_demo_login_form() {
    let dir = TempDir::new().unwrap();
    cli()
        .current_dir(dir.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("class LoginPage extends StatefulWidget"))
        .stdout(predicate::str::contains("labelText: 'Password',"))
        .stdout(predicate::str::contains("child: Text('CREATE ACCOUNT')"))
        .stderr(predicate::str::contains("7 widgets, 7 rows"));
}

// ============ BATCH COMMAND TESTS ============

#[test]
fn test_batch_generates_one_file_per_input() {
    let dir = TempDir::new().unwrap();
    let first = write_input(dir.path(), "home.json", GO_HELLO);
    let settings = json!({
        "page_name": "Settings",
        "detections": [{
            "kind": "switch",
            "bounding_box": {"x": 0.1, "y": 0.2, "width": 0.8, "height": 0.05},
            "label": "Dark mode"
        }]
    });
    let second = write_input(dir.path(), "settings.json", &settings.to_string());
    let out_dir = dir.path().join("out");

    cli()
        .current_dir(dir.path())
        .arg("batch")
        .arg(&first)
        .arg(&second)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 succeeded, 0 failed"));

    let home = fs::read_to_string(out_dir.join("home.dart")).unwrap();
    assert!(home.contains("class Home extends StatefulWidget"));
    let settings = fs::read_to_string(out_dir.join("settings.dart")).unwrap();
    assert!(settings.contains("class Settings extends StatefulWidget"));
    assert!(settings.contains("SwitchListTile("));
}

#[test]
fn test_batch_reports_failures() {
    let dir = TempDir::new().unwrap();
    let good = write_input(dir.path(), "home.json", GO_HELLO);
    let bad = write_input(dir.path(), "bad.json", "[1, 2");
    let out_dir = dir.path().join("out");

    cli()
        .current_dir(dir.path())
        .arg("batch")
        .arg(&good)
        .arg(&bad)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 inputs failed"));

    assert!(out_dir.join("home.dart").exists());
    assert!(!out_dir.join("bad.dart").exists());
}

#[test]
fn test_batch_rejects_duplicate_stems() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    let first = write_input(&dir.path().join("a"), "login.json", GO_HELLO);
    let second = write_input(&dir.path().join("b"), "login.json", GO_HELLO);
    let out_dir = dir.path().join("out");

    cli()
        .current_dir(dir.path())
        .arg("batch")
        .arg(&first)
        .arg(&second)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both write login.dart"));

    assert!(!out_dir.join("login.dart").exists());
}

#[test]
fn test_generate_rejects_page_object_without_detections() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "empty.json", &json!({"page_name": "Empty"}).to_string());

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid detection input"));
}

#[test]
fn test_generate_raw_flag_rejects_typed_page() {
    let dir = TempDir::new().unwrap();
    let page = json!({
        "detections": [{
            "kind": "button",
            "bounding_box": {"x": 0.1, "y": 0.1, "width": 0.3, "height": 0.05}
        }]
    });
    let input = write_input(dir.path(), "typed.json", &page.to_string());

    cli()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&input)
        .arg("--raw")
        .assert()
        .failure()
        .stderr(predicate::str::contains("observations"));
}
