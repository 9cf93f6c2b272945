use crate::common::command::{database_dir, run_depot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn check_in_unknown_project_fails(database_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_depot_command(database_dir.path(), &["check-in", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[NotFound]"))
        .stderr(predicate::str::contains("alice/missing"));

    assert!(!database_dir.path().join("alice/missing").exists());

    Ok(())
}
