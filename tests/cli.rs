use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomodo(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomodo").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn add_json(home: &TempDir, text: &str) -> serde_json::Value {
    let output = pomodo(home)
        .args(["--output", "json", "task", "add", text])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_task_add_and_list() {
    let home = TempDir::new().unwrap();

    pomodo(&home)
        .args(["task", "add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: [ ] Buy milk"));

    pomodo(&home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("1 of 1 remaining"));

    assert!(home.path().join(".pomodo").join("pomodo.db").exists());
}

#[test]
fn test_task_add_blank_is_noop() {
    let home = TempDir::new().unwrap();

    pomodo(&home)
        .args(["task", "add", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to add"));

    pomodo(&home)
        .args(["task", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"));
}

#[test]
fn test_newest_task_listed_first() {
    let home = TempDir::new().unwrap();
    add_json(&home, "Buy milk");
    add_json(&home, "Write report");

    let output = pomodo(&home)
        .args(["-o", "json", "task", "list"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["count"], 2);
    assert_eq!(value["items"][0]["text"], "Write report");
    assert_eq!(value["items"][1]["text"], "Buy milk");
    assert!(value["items"][0]["createdAt"].is_string());
}

#[test]
fn test_toggle_and_clear() {
    let home = TempDir::new().unwrap();
    let task = add_json(&home, "Buy milk");
    let id = task["id"].as_i64().unwrap().to_string();

    pomodo(&home)
        .args(["task", "toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: Buy milk"))
        .stdout(predicate::str::contains("All done! 🎉"));

    pomodo(&home)
        .args(["task", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 completed task"));

    pomodo(&home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 tasks"));
}

#[test]
fn test_unknown_id_is_noop() {
    let home = TempDir::new().unwrap();

    pomodo(&home)
        .args(["task", "delete", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No task with id 42"));
}

#[test]
fn test_default_output_from_config() {
    let home = TempDir::new().unwrap();
    let root = home.path().join(".pomodo");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("config.yaml"), "general:\n  default_output: json\n").unwrap();

    let output = pomodo(&home).args(["task", "list"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 0);
    assert_eq!(value["summary"], "0 tasks");
}

#[test]
fn test_database_path_from_config() {
    let home = TempDir::new().unwrap();
    let root = home.path().join(".pomodo");
    let db = home.path().join("data").join("tasks.db");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(
        root.join("config.yaml"),
        format!("storage:\n  database: {}\n", db.display()),
    )
    .unwrap();

    add_json(&home, "Buy milk");
    assert!(db.exists());
}

#[test]
fn test_invalid_config_fails() {
    let home = TempDir::new().unwrap();
    let root = home.path().join(".pomodo");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("config.yaml"), "general: [not, a, map]\n").unwrap();

    pomodo(&home)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    pomodo(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodo"));
}

#[test]
fn test_unknown_mode_rejected() {
    let home = TempDir::new().unwrap();

    pomodo(&home)
        .args(["run", "--mode", "nap"])
        .assert()
        .failure();
}
