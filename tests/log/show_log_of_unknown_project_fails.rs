use crate::common::command::{database_dir, run_depot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_log_of_unknown_project_fails(database_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_depot_command(database_dir.path(), &["log", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[NotFound]"));

    Ok(())
}
