use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn tasktrack(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tasktrack-cli").unwrap();
    cmd.env("TASKTRACK_HOME", store_root(dir));
    cmd
}

fn store_root(dir: &TempDir) -> PathBuf {
    dir.path().join("store")
}

fn task_file(dir: &TempDir, id: u32) -> Value {
    let path = store_root(dir).join("tasks").join(format!("{}.json", id));
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn pool_file(dir: &TempDir) -> Value {
    let path = store_root(dir).join("tasks").join("idPool.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn list_ids(dir: &TempDir, status: &str) -> Vec<u64> {
    let output = tasktrack(dir)
        .args(["list", status, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let tasks: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    tasks.iter().map(|t| t["id"].as_u64().unwrap()).collect()
}

#[test]
fn first_run_bootstraps_storage() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active tasks."));

    let root = store_root(&dir);
    assert!(root.join("tasks").is_dir());
    assert!(root.join("configs").is_dir());
    assert!(root.join("configs/config.json").is_file());
    assert_eq!(pool_file(&dir), serde_json::json!([]));
}

#[test]
fn two_runs_in_a_row_succeed() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).arg("list").assert().success();
    tasktrack(&dir).arg("list").assert().success();
}

#[test]
fn create_writes_task_file_and_pool() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .args(["create", "buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 created"));

    let task = task_file(&dir, 1);
    assert_eq!(task["id"], 1);
    assert_eq!(task["task"], "buy milk");
    assert_eq!(task["status"], 0);
    assert!(task["createdAt"].as_str().unwrap().ends_with("UTC"));
    assert_eq!(pool_file(&dir), serde_json::json!([1]));
}

#[test]
fn add_is_an_alias_for_create() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .args(["add", "write report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 created"));
}

#[test]
fn create_without_description_fails() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).arg("create").assert().code(1);
    tasktrack(&dir)
        .args(["create", "  "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("description cannot be empty"));
}

#[test]
fn scenario_create_mark_and_filter() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .args(["create", "buy milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 created"));
    tasktrack(&dir)
        .args(["create", "write report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2 created"));
    tasktrack(&dir)
        .args(["mark", "1", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1: active -> done"));

    assert_eq!(task_file(&dir, 1)["status"], 1);
    assert_eq!(list_ids(&dir, "active"), vec![2]);
    assert_eq!(list_ids(&dir, "done"), vec![1]);
    assert!(list_ids(&dir, "inactive").is_empty());

    tasktrack(&dir)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("write report"))
        .stdout(predicate::str::contains("buy milk").not());
}

#[test]
fn list_rejects_unknown_status() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .args(["list", "finished"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("finished"));
}

#[test]
fn mark_to_same_status_fails_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "x"]).assert().success();
    let path = store_root(&dir).join("tasks/1.json");
    let before = fs::read(&path).unwrap();

    tasktrack(&dir)
        .args(["mark", "1", "active"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already has status active"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn mark_validates_arguments() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "x"]).assert().success();

    tasktrack(&dir)
        .args(["mark", "abc", "done"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid task id 'abc'"));
    tasktrack(&dir)
        .args(["mark", "9", "done"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("task 9 not found"));
    tasktrack(&dir)
        .args(["mark", "1", "later"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("later"));
}

#[test]
fn unknown_command_fails() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn show_prints_task() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "call mom"]).assert().success();

    tasktrack(&dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("call mom"))
        .stdout(predicate::str::contains("Status:  active"));

    let output = tasktrack(&dir).args(["show", "1", "--json"]).output().unwrap();
    let task: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(task["task"], "call mom");
}

#[test]
fn corrupt_task_file_fails_listing() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "a"]).assert().success();
    fs::write(store_root(&dir).join("tasks/1.json"), "not json").unwrap();

    tasktrack(&dir).arg("list").assert().code(1);
}

#[test]
fn legacy_pool_file_is_accepted() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "a"]).assert().success();
    fs::write(
        store_root(&dir).join("tasks/idPool.json"),
        r#"{"1":null}"#,
    )
    .unwrap();

    tasktrack(&dir)
        .args(["create", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2 created"));
    assert_eq!(pool_file(&dir), serde_json::json!([1, 2]));
}

#[test]
fn reindex_recovers_lost_pool() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "a"]).assert().success();
    tasktrack(&dir).args(["create", "b"]).assert().success();
    fs::write(store_root(&dir).join("tasks/idPool.json"), "[]").unwrap();

    // without a repair the next create collides with 1.json
    tasktrack(&dir)
        .args(["create", "c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    tasktrack(&dir)
        .arg("reindex")
        .assert()
        .success()
        .stdout(predicate::str::contains("tasks:   2"));
    assert_eq!(pool_file(&dir), serde_json::json!([1, 2]));

    tasktrack(&dir)
        .args(["create", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 3 created"));
}

#[test]
fn help_exits_zero() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mark"));
}

#[test]
fn reindex_clears_leftover_pool_lock() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "a"]).assert().success();
    let lock = store_root(&dir).join("tasks/idPool.json.lock");
    fs::write(&lock, "").unwrap();

    tasktrack(&dir)
        .args(["create", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("idPool.json.lock"));
    assert!(!store_root(&dir).join("tasks/2.json").exists());

    tasktrack(&dir).arg("reindex").assert().success();
    assert!(!lock.exists());

    tasktrack(&dir)
        .args(["create", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2 created"));
    assert_eq!(pool_file(&dir), serde_json::json!([1, 2]));
}

#[test]
fn mark_rejects_record_with_wrong_id() {
    let dir = TempDir::new().unwrap();
    tasktrack(&dir).args(["create", "one"]).assert().success();
    tasktrack(&dir).args(["create", "two"]).assert().success();
    let tasks = store_root(&dir).join("tasks");
    let two = fs::read_to_string(tasks.join("2.json")).unwrap();
    fs::write(tasks.join("1.json"), &two).unwrap();

    tasktrack(&dir)
        .args(["mark", "1", "done"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("holds a record for task 2"));
    assert_eq!(fs::read_to_string(tasks.join("2.json")).unwrap(), two);
}

#[test]
fn root_flag_overrides_environment() {
    let dir = TempDir::new().unwrap();
    let other = dir.path().join("other");
    tasktrack(&dir)
        .arg("--root")
        .arg(&other)
        .args(["create", "elsewhere"])
        .assert()
        .success();

    assert!(other.join("tasks/1.json").is_file());
    assert!(!store_root(&dir).join("tasks/1.json").exists());
}

#[test]
fn default_root_lives_under_home() {
    let dir = TempDir::new().unwrap();
    #[allow(deprecated)]
    Command::cargo_bin("tasktrack-cli")
        .unwrap()
        .env_remove("TASKTRACK_HOME")
        .env("HOME", dir.path())
        .args(["create", "home task"])
        .assert()
        .success();

    assert!(dir.path().join(".task-tracker-cli/tasks/1.json").is_file());
}
