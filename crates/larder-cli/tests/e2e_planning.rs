//! E2E planning workflow: browse, select, buy, export.
//!
//! Each test runs the `larder` binary as a subprocess in an isolated temp
//! directory holding a markdown catalog.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const CATALOG: &str = "\
# Recipes

## Spring

### Pancakes

- 2 eggs
- 1 cup milk

1. Whisk everything.
2. Fry in butter.

### Omelette

- 2 Eggs
- 1 tsp salt

## Summer

### Gazpacho

- 4 tomatoes
- 1 cucumber
";

/// Build a Command targeting the larder binary, rooted in `dir`.
fn larder_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("larder"));
    cmd.current_dir(dir);
    // Keep the user's own config out of the picture
    cmd.env("XDG_CONFIG_HOME", dir.join(".user-config"));
    cmd.env("HOME", dir);
    cmd.env_remove("FORMAT");
    // Suppress tracing output that goes to stderr
    cmd.env("LARDER_LOG", "error");
    cmd
}

fn setup() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("recipes.md"), CATALOG).expect("write catalog");
    dir
}

/// Run with `--json`, assert success, return parsed stdout.
fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = larder_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("larder should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

/// Run with `--json`, assert failure, return the parsed error object.
fn run_json_err(dir: &Path, args: &[&str]) -> Value {
    let output = larder_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("larder should not crash");
    assert!(!output.status.success(), "{args:?} unexpectedly succeeded");
    let json: Value = serde_json::from_slice(&output.stderr).expect("error JSON on stderr");
    json["error"].clone()
}

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

#[test]
fn recipes_lists_catalog_in_order() {
    let dir = setup();
    let json = run_json(dir.path(), &["recipes"]);
    let ids: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, ["pancakes", "omelette", "gazpacho"]);
    assert_eq!(json[0]["section"], "Spring");
    assert_eq!(json[0]["selected"], false);
}

#[test]
fn recipes_text_marks_selection() {
    let dir = setup();
    run_json(dir.path(), &["select", "gazpacho"]);
    larder_cmd(dir.path())
        .args(["recipes", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*\tgazpacho\tGazpacho"))
        .stdout(predicate::str::contains("-\tpancakes\tPancakes"));
}

#[test]
fn search_matches_ingredients_and_hides_sections() {
    let dir = setup();
    let json = run_json(dir.path(), &["search", "TOMATO"]);
    assert_eq!(json["term"], "tomato");
    assert_eq!(json["count"], 1);
    assert_eq!(json["recipes"][0]["id"], "gazpacho");
    let sections: Vec<&str> = json["sections"]
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["name"].as_str().expect("name"))
        .collect();
    assert_eq!(sections, ["Summer"]);
}

// ---------------------------------------------------------------------------
// Plan and groceries
// ---------------------------------------------------------------------------

#[test]
fn selecting_builds_a_deduplicated_list() {
    let dir = setup();
    let json = run_json(dir.path(), &["select", "pancakes", "Omelette"]);
    assert_eq!(json["count_line"], "2 recipes selected");
    assert_eq!(json["remaining"], 3);
    assert_eq!(json["launcher"], "Grocery List (3)");

    let list = run_json(dir.path(), &["groceries"]);
    let labels: Vec<&str> = list["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|r| r["label"].as_str().expect("label"))
        .collect();
    assert_eq!(labels, ["1 cup milk", "1 tsp salt", "2 eggs (x2)"]);
    assert_eq!(list["tags"], serde_json::json!(["Pancakes", "Omelette"]));
}

#[test]
fn buying_updates_badge_and_deselect_prunes() {
    let dir = setup();
    run_json(dir.path(), &["select", "pancakes"]);

    let json = run_json(dir.path(), &["buy", "2"]);
    assert_eq!(json["keys"], serde_json::json!(["2 eggs"]));
    assert_eq!(json["remaining"], 1);

    let list = run_json(dir.path(), &["groceries", "--remaining"]);
    assert_eq!(list["rows"].as_array().expect("rows").len(), 1);

    run_json(dir.path(), &["deselect", "pancakes"]);
    let json = run_json(dir.path(), &["select", "omelette"]);
    // the eggs purchase was dropped with pancakes
    assert_eq!(json["remaining"], 2);
}

#[test]
fn clear_empties_the_list() {
    let dir = setup();
    run_json(dir.path(), &["select", "gazpacho"]);
    let json = run_json(dir.path(), &["clear"]);
    assert_eq!(json["launcher"], "Grocery List");
    let list = run_json(dir.path(), &["groceries"]);
    assert!(list["rows"].as_array().expect("rows").is_empty());
    assert_eq!(list["count_line"], "0 recipes selected");
}

#[test]
fn state_file_lands_under_project_dir() {
    let dir = setup();
    run_json(dir.path(), &["select", "gazpacho"]);
    assert!(dir.path().join(".larder/state.json").exists());
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_text_prints_the_list() {
    let dir = setup();
    run_json(dir.path(), &["select", "gazpacho"]);
    larder_cmd(dir.path())
        .args(["export", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Groceries for 1 recipe\nRecipes: Gazpacho\n\n",
        ))
        .stdout(predicate::str::contains("• 4 tomatoes\n• 1 cucumber"));
}

#[test]
fn export_with_nothing_selected_has_no_bullets() {
    let dir = setup();
    let json = run_json(dir.path(), &["export"]);
    assert_eq!(json["text"], "Groceries for 0 recipes");
}

#[test]
fn export_download_writes_file() {
    let dir = setup();
    run_json(dir.path(), &["select", "pancakes"]);
    let json = run_json(dir.path(), &["export", "download", "--dir", "out"]);
    assert_eq!(json["action"], "download");
    assert_eq!(json["ok"], true);
    let path = dir.path().join("out").join("grocery-list.txt");
    let saved = std::fs::read_to_string(&path).expect("saved list");
    assert!(saved.starts_with("Groceries for 1 recipe\n"));
}

#[cfg(unix)]
#[test]
fn export_copy_uses_configured_clipboard() {
    let dir = setup();
    larder_cmd(dir.path())
        .args([
            "config",
            "set",
            "commands.clipboard",
            r#"["sh", "-c", "cat > clip.txt"]"#,
        ])
        .assert()
        .success();
    run_json(dir.path(), &["select", "gazpacho"]);

    let json = run_json(dir.path(), &["export", "copy"]);
    assert_eq!(json["status"], "Copied to clipboard");
    let copied = std::fs::read_to_string(dir.path().join("clip.txt")).expect("clipboard file");
    assert!(copied.contains("• 4 tomatoes"));
}

#[cfg(unix)]
#[test]
fn failing_clipboard_exits_nonzero() {
    let dir = setup();
    larder_cmd(dir.path())
        .args(["config", "set", "commands.clipboard", "sh -c false"])
        .assert()
        .success();
    larder_cmd(dir.path())
        .args(["export", "copy", "--format", "text"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Copy failed"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_recipe_reports_code_and_leaves_state() {
    let dir = setup();
    run_json(dir.path(), &["select", "gazpacho"]);
    let err = run_json_err(dir.path(), &["select", "pancakes", "lasagna"]);
    assert_eq!(err["error_code"], "E2001");
    assert!(err["suggestion"].as_str().is_some());

    let json = run_json(dir.path(), &["recipes", "--selected"]);
    assert_eq!(json.as_array().expect("array").len(), 1);
}

#[test]
fn missing_catalog_reports_code() {
    let dir = TempDir::new().expect("tempdir");
    let err = run_json_err(dir.path(), &["recipes"]);
    assert_eq!(err["error_code"], "E1001");
}

#[test]
fn buying_an_unlisted_item_fails() {
    let dir = setup();
    let err = run_json_err(dir.path(), &["buy", "saffron"]);
    assert_eq!(err["error_code"], "E2002");
}

#[test]
fn rejected_buy_leaves_every_item_unbought() {
    let dir = setup();
    run_json(dir.path(), &["select", "pancakes"]);
    let err = run_json_err(dir.path(), &["buy", "2 eggs", "caviar"]);
    assert_eq!(err["error_code"], "E2002");

    let list = run_json(dir.path(), &["groceries"]);
    let rows = list["rows"].as_array().expect("rows");
    assert!(rows.iter().all(|r| r["purchased"] == false));
    assert_eq!(list["remaining"], 2);
}

#[test]
fn remaining_json_keeps_list_numbers() {
    let dir = setup();
    run_json(dir.path(), &["select", "pancakes"]);
    run_json(dir.path(), &["buy", "1"]);
    let list = run_json(dir.path(), &["groceries", "--remaining"]);
    let rows = list["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["number"], 2);
    assert_eq!(rows[0]["key"], "2 eggs");
}

#[test]
fn text_errors_go_to_stderr() {
    let dir = setup();
    larder_cmd(dir.path())
        .args(["select", "lasagna", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2001]"));
}
