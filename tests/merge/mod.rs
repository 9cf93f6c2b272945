mod merge_in_after_resolution;
mod merge_out_materializes_conflicts;
mod merge_out_with_missing_artifact_fails;
mod merge_with_relative_root;

use crate::common;
use crate::common::command::{PROJECT, USER, run_depot_command, run_depot_command_as};
use crate::common::file::{FileSpec, write_file};
use std::path::Path;

pub const OTHER_USER: &str = "bob";

/// Histories of `alice/proj` and `bob/proj` that diverge after a shared
/// check-in of `a.txt` ("base") and `notes.md`:
///
/// ```text
/// alice: create <- base <- alice's edit
///                    \
/// bob:                checkout <- bob's edit
/// ```
///
/// Returns `(base, alice_head, bob_head)`.
pub fn diverged_histories(root: &Path) -> (u64, u64, u64) {
    let alice_dir = common::project_path(root, USER, PROJECT);
    let bob_dir = common::project_path(root, OTHER_USER, PROJECT);

    run_depot_command(root, &["create", PROJECT]).assert().success();
    write_file(FileSpec::new(alice_dir.join("a.txt"), "base".to_string()));
    write_file(FileSpec::new(alice_dir.join("notes.md"), "shared".to_string()));
    run_depot_command(root, &["check-in", PROJECT]).assert().success();
    let base = common::head_id(root, USER, PROJECT);

    run_depot_command_as(
        root,
        OTHER_USER,
        &["check-out", PROJECT, &base.to_string(), "--from-user", USER],
    )
    .assert()
    .success();
    write_file(FileSpec::new(bob_dir.join("a.txt"), "bob".to_string()));
    run_depot_command_as(root, OTHER_USER, &["check-in", PROJECT])
        .assert()
        .success();
    let bob_head = common::head_id(root, OTHER_USER, PROJECT);

    write_file(FileSpec::new(alice_dir.join("a.txt"), "alice".to_string()));
    run_depot_command(root, &["check-in", PROJECT]).assert().success();
    let alice_head = common::head_id(root, USER, PROJECT);

    (base, alice_head, bob_head)
}

pub fn merge_out_from_bob(root: &Path, bob_head: u64, alice_head: u64) -> assert_cmd::Command {
    run_depot_command(
        root,
        &[
            "merge-out",
            PROJECT,
            &bob_head.to_string(),
            &alice_head.to_string(),
            "--from-user",
            OTHER_USER,
        ],
    )
}
