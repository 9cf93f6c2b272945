use crate::common;
use crate::common::command::{PROJECT, USER, checked_in_project, run_depot_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn show_history_of_project(checked_in_project: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let root = checked_in_project.path();
    let ids = common::manifest_ids(root, USER, PROJECT);
    let (create_id, check_in_id) = (ids[0], ids[1]);

    run_depot_command(root, &["label", PROJECT, &create_id.to_string(), "empty"])
        .assert()
        .success();

    let newest_first = format!(
        r"(?s)^manifest {} \(HEAD\)\nCommand: check-in\n.*Parents: {}\n.*Entries: 5\n\nmanifest {} \(empty\)\nCommand: create\n.*Entries: 0\n\n$",
        check_in_id, create_id, create_id
    );

    run_depot_command(root, &["log", PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::is_match(newest_first)?)
        .stdout(predicate::str::contains("User:    alice"));

    Ok(())
}
