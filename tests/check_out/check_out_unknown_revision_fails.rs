use crate::common;
use crate::common::command::{PROJECT, USER, checked_in_project, run_depot_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("no-such-label")]
#[case("12345")]
fn check_out_unknown_revision_fails(
    checked_in_project: TempDir,
    #[case] revision: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = checked_in_project.path();
    let manifests_before = common::manifest_ids(root, USER, PROJECT);

    run_depot_command(root, &["check-out", PROJECT, revision])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[NotFound]"));

    assert_eq!(common::manifest_ids(root, USER, PROJECT), manifests_before);

    Ok(())
}
