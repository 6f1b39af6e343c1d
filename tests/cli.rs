//! CLI integration tests for jotter admin commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use assert_cmd::Command;
use jotter::auth::{AuthResult, authenticate};
use jotter::store::{SqliteStore, Store};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn database_url(&self) -> String {
        format!("sqlite://{}", self.temp_dir.path().join("jotter.db").display())
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("jotter").expect("failed to find binary");
        cmd.env_remove("DATABASE_URL").env_remove("JOTTER_PASSWORD");
        cmd
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["admin", "init", "--database-url", &self.database_url()])
            .assert()
    }

    fn add_user(&self, name: &str, password: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .args([
                "admin",
                "user",
                "add",
                "--database-url",
                &self.database_url(),
                "--name",
                name,
                "--password",
                password,
                "--non-interactive",
            ])
            .assert()
    }

    fn list_json(&self) -> Value {
        let output = self
            .cmd()
            .args([
                "admin",
                "user",
                "list",
                "--database-url",
                &self.database_url(),
                "--json",
            ])
            .output()
            .expect("failed to run command");

        serde_json::from_slice(&output.stdout).expect("failed to parse JSON")
    }

    fn open_store(&self) -> SqliteStore {
        SqliteStore::new(self.temp_dir.path().join("jotter.db")).expect("failed to open store")
    }
}

#[test]
fn test_init_creates_database() {
    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("Database ready at"));

    assert!(ctx.temp_dir.path().join("jotter.db").exists());
}

#[test]
fn test_init_is_idempotent() {
    let ctx = TestContext::new();

    ctx.init().success();
    ctx.add_user("alice", "secret123").success();
    ctx.init().success();

    let users = ctx.list_json();
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_init_accepts_plain_path() {
    let ctx = TestContext::new();
    let path = ctx.temp_dir.path().join("nested").join("notes.db");

    ctx.cmd()
        .args(["admin", "init", "--database-url", &path.to_string_lossy()])
        .assert()
        .success();

    assert!(path.exists());
}

#[test]
fn test_init_rejects_other_schemes() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "admin",
            "init",
            "--database-url",
            "postgres://localhost/notes",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("postgres"));
}

#[test]
fn test_user_add_and_list() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.add_user("alice", "secret123")
        .success()
        .stdout(predicate::str::contains("Created user 'alice'"));

    let users = ctx.list_json();
    let users = users.as_array().expect("expected array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "alice");
    assert!(users[0].get("password_digest").is_none());

    ctx.cmd()
        .args(["admin", "user", "list", "--database-url", &ctx.database_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn test_user_add_stores_verifiable_password() {
    let ctx = TestContext::new();
    ctx.init().success();
    ctx.add_user("alice", "secret123").success();

    let store = ctx.open_store();
    let result = authenticate(&store, "alice", "secret123").unwrap();
    assert!(matches!(result, AuthResult::Authenticated(user) if user.name == "alice"));

    let result = authenticate(&store, "alice", "wrong").unwrap();
    assert!(matches!(result, AuthResult::WrongPassword));
}

#[test]
fn test_user_add_password_from_env() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.cmd()
        .env("JOTTER_PASSWORD", "from-env")
        .args([
            "admin",
            "user",
            "add",
            "--database-url",
            &ctx.database_url(),
            "--name",
            "bob",
            "--non-interactive",
        ])
        .assert()
        .success();

    let store = ctx.open_store();
    let result = authenticate(&store, "bob", "from-env").unwrap();
    assert!(matches!(result, AuthResult::Authenticated(_)));
}

#[test]
fn test_user_add_duplicate_fails() {
    let ctx = TestContext::new();
    ctx.init().success();
    ctx.add_user("alice", "secret123").success();

    ctx.add_user("alice", "other")
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(ctx.list_json().as_array().map(Vec::len), Some(1));
}

#[test]
fn test_user_add_rejects_invalid_name() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.add_user("two words", "secret123").failure();

    assert_eq!(ctx.list_json().as_array().map(Vec::len), Some(0));
}

#[test]
fn test_user_add_non_interactive_requires_password() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.cmd()
        .args([
            "admin",
            "user",
            "add",
            "--database-url",
            &ctx.database_url(),
            "--name",
            "alice",
            "--non-interactive",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password is required"));

    let store = ctx.open_store();
    assert!(store.get_user_by_name("alice").unwrap().is_none());
}

#[test]
fn test_user_add_without_init_fails() {
    let ctx = TestContext::new();

    ctx.add_user("alice", "secret123")
        .failure()
        .stderr(predicate::str::contains("jotter admin init"));
}

#[test]
fn test_user_list_empty() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.cmd()
        .args(["admin", "user", "list", "--database-url", &ctx.database_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No users"));
}
