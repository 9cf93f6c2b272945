use crate::common;
use crate::common::command::{PROJECT, USER, database_dir, run_depot_command_in};
use crate::common::file::{FileSpec, write_file};
use crate::merge::OTHER_USER;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;
use std::path::Path;

#[rstest]
fn merge_with_relative_root(database_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = database_dir.path();
    let other_dir = work_dir.join("elsewhere");
    std::fs::create_dir_all(&other_dir)?;
    let root = work_dir.join("database");
    let alice_dir = common::project_path(work_dir, "database", USER).join(PROJECT);
    let bob_dir = common::project_path(work_dir, "database", OTHER_USER).join(PROJECT);

    let depot = |user: &str, args: &[&str]| run_depot_command_in(work_dir, "database", user, args);

    depot(USER, &["create", PROJECT]).assert().success();
    write_file(FileSpec::new(alice_dir.join("a.txt"), "base".to_string()));
    depot(USER, &["check-in", PROJECT]).assert().success();
    let base = common::head_id(&root, USER, PROJECT);

    depot(
        OTHER_USER,
        &["check-out", PROJECT, &base.to_string(), "--from-user", USER],
    )
    .assert()
    .success();
    write_file(FileSpec::new(bob_dir.join("a.txt"), "bob".to_string()));
    depot(OTHER_USER, &["check-in", PROJECT]).assert().success();
    let bob_head = common::head_id(&root, OTHER_USER, PROJECT);

    write_file(FileSpec::new(alice_dir.join("a.txt"), "alice".to_string()));
    depot(USER, &["check-in", PROJECT]).assert().success();
    let alice_head = common::head_id(&root, USER, PROJECT);

    depot(
        USER,
        &[
            "merge-out",
            PROJECT,
            &bob_head.to_string(),
            &alice_head.to_string(),
            "--from-user",
            OTHER_USER,
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("1 conflict(s)"));

    let manifest = common::head_manifest(&root, USER, PROJECT);
    for recorded in [
        &manifest["parent"][0]["parentRepoPath"],
        &manifest["parent"][1]["parentRepoPath"],
        &manifest["structure"][0]["fromSource"],
        &manifest["structure"][0]["fromTarget"],
    ] {
        let recorded = recorded.as_str().expect("recorded path is a string");
        assert!(Path::new(recorded).is_absolute(), "{} is relative", recorded);
    }

    // another working directory reaches the same root through another path
    run_depot_command_in(&other_dir, "../database", USER, &["merge-in", PROJECT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[InvalidState]"))
        .stderr(predicate::str::contains("3 conflict file(s) still present"));

    for variant in ["a_mr.txt", "a_mg.txt", "a_mt.txt"] {
        std::fs::remove_file(alice_dir.join(variant))?;
    }
    std::fs::write(alice_dir.join("a.txt"), "merged")?;

    run_depot_command_in(&other_dir, "../database", USER, &["merge-in", PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::contains("merge completed"));

    Ok(())
}
