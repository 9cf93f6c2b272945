use crate::common;
use crate::common::command::{PROJECT, USER, database_dir, run_depot_command};
use crate::merge::{diverged_histories, merge_out_from_bob};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_in_after_resolution(database_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let root = database_dir.path();
    let (_base, alice_head, bob_head) = diverged_histories(root);
    let alice_dir = common::project_path(root, USER, PROJECT);

    merge_out_from_bob(root, bob_head, alice_head)
        .assert()
        .success();
    let merge_out = common::head_id(root, USER, PROJECT);

    std::fs::write(alice_dir.join("a.txt"), "merged")?;
    for variant in ["a_mr.txt", "a_mg.txt", "a_mt.txt"] {
        std::fs::remove_file(alice_dir.join(variant))?;
    }

    run_depot_command(root, &["merge-in", PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::contains("merge completed"));

    let manifest = common::head_manifest(root, USER, PROJECT);
    assert_eq!(manifest["command"], "merge-in");
    assert_eq!(manifest["parent"][0]["parentId"], merge_out);

    let mut nodes = manifest["structure"]
        .as_array()
        .expect("structure is a list")
        .iter()
        .filter_map(|entry| entry["artifactNode"].as_str().map(str::to_string))
        .collect::<Vec<_>>();
    nodes.sort();
    assert_eq!(
        nodes,
        vec!["a.txt/3756-L6.txt".to_string(), "notes.md/3773-L6.md".to_string()]
    );

    // the project is clean again
    run_depot_command(root, &["merge-in", PROJECT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[InvalidState]"));

    Ok(())
}
