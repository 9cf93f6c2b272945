use crate::common;
use crate::common::command::{PROJECT, USER, database_dir, run_depot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_existing_project_fails(database_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_depot_command(database_dir.path(), &["create", PROJECT])
        .assert()
        .success();
    let head = common::head_id(database_dir.path(), USER, PROJECT);

    run_depot_command(database_dir.path(), &["create", PROJECT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[AlreadyExists]"))
        .stderr(predicate::str::contains("alice/proj"));

    // the existing history is untouched
    assert_eq!(common::head_id(database_dir.path(), USER, PROJECT), head);
    assert_eq!(common::manifest_ids(database_dir.path(), USER, PROJECT).len(), 1);

    Ok(())
}
