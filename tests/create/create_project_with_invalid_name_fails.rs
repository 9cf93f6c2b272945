use crate::common::command::{database_dir, run_depot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("..")]
#[case("nested/name")]
fn create_project_with_invalid_name_fails(
    database_dir: TempDir,
    #[case] project: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_depot_command(database_dir.path(), &["create", project])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[InvalidState]"));

    Ok(())
}
