use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const USER: &str = "alice";
pub const PROJECT: &str = "proj";

#[fixture]
pub fn database_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// `alice/proj` with one file per level, created but not checked in yet
#[fixture]
pub fn created_project(database_dir: TempDir) -> TempDir {
    run_depot_command(database_dir.path(), &["create", PROJECT])
        .assert()
        .success();

    let project_dir = database_dir.path().join(USER).join(PROJECT);
    write_file(FileSpec::new(project_dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(
        project_dir.join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        project_dir.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    database_dir
}

/// [`created_project`] with its files checked in
#[fixture]
pub fn checked_in_project(created_project: TempDir) -> TempDir {
    run_depot_command(created_project.path(), &["check-in", PROJECT])
        .assert()
        .success();

    created_project
}

pub fn run_depot_command(root: &Path, args: &[&str]) -> Command {
    run_depot_command_as(root, USER, args)
}

pub fn run_depot_command_as(root: &Path, user: &str, args: &[&str]) -> Command {
    let mut cmd = depot_command(user);
    cmd.arg("--root").arg(root);
    cmd.args(args);
    cmd
}

/// Run depot from `current_dir` with `root` passed as given, relative or not
pub fn run_depot_command_in(current_dir: &Path, root: &str, user: &str, args: &[&str]) -> Command {
    let mut cmd = depot_command(user);
    cmd.current_dir(current_dir);
    cmd.arg("--root").arg(root);
    cmd.args(args);
    cmd
}

fn depot_command(user: &str) -> Command {
    let mut cmd = Command::cargo_bin("depot").expect("Failed to find depot binary");
    cmd.env_remove("DEPOT_MERGE_BASE");
    cmd.env_remove("DEPOT_ROOT");
    cmd.envs(vec![("DEPOT_USER", user), ("NO_COLOR", "1")]);
    cmd
}
