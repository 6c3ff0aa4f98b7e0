#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use tempfile::TempDir;

pub const PASSWORD: &str = "secret42";

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Fresh DB path inside its own temp dir; keep the dir alive for the test.
pub fn setup_test_db(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(format!("{}_rattendance.sqlite", name));
    (dir, path.to_string_lossy().to_string())
}

/// `rattendance --db <db> <args...>`
pub fn rat_db(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = rat();
    cmd.args(["--db", db_path]).args(args);
    cmd
}

/// Initialize the schema, then register and sign in `email`.
pub fn init_and_login(db_path: &str, email: &str, name: Option<&str>) {
    rat_db(db_path, &["--test", "init"]).assert().success();

    let mut register = vec!["register", "--email", email, "--password", PASSWORD];
    if let Some(n) = name {
        register.extend(["--name", n]);
    }
    rat_db(db_path, &register).assert().success();

    rat_db(db_path, &["login", "--email", email, "--password", PASSWORD])
        .assert()
        .success();
}

pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
