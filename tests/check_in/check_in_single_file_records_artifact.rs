use crate::common;
use crate::common::command::{PROJECT, USER, database_dir, run_depot_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn check_in_single_file_records_artifact(
    database_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_depot_command(database_dir.path(), &["create", PROJECT])
        .assert()
        .success();
    let create_id = common::head_id(database_dir.path(), USER, PROJECT);

    let project_dir = common::project_path(database_dir.path(), USER, PROJECT);
    write_file(FileSpec::new(project_dir.join("a.txt"), "hello".to_string()));

    run_depot_command(database_dir.path(), &["check-in", PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::contains("checked in 1 entries"));

    let manifest = common::head_manifest(database_dir.path(), USER, PROJECT);
    assert_eq!(manifest["command"], "check-in");
    assert_eq!(
        manifest["structure"],
        serde_json::json!([{ "artifactNode": "a.txt/3794-L5.txt", "artifactRelPath": "." }])
    );
    assert_eq!(manifest["parent"][0]["parentId"], create_id);
    assert_eq!(
        manifest["parent"][0]["parentRepoPath"],
        project_dir.join(".depot/.manifests").display().to_string()
    );

    let artifact = project_dir.join(".depot/a.txt/3794-L5.txt");
    assert_eq!(std::fs::read_to_string(artifact)?, "hello");

    Ok(())
}
