use crate::common;
use crate::common::command::{PROJECT, USER, database_dir};
use crate::merge::{OTHER_USER, diverged_histories, merge_out_from_bob};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_out_materializes_conflicts(database_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let root = database_dir.path();
    let (_base, alice_head, bob_head) = diverged_histories(root);
    let alice_dir = common::project_path(root, USER, PROJECT);

    merge_out_from_bob(root, bob_head, alice_head)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 conflict(s)"))
        .stdout(predicate::str::contains("a_mr.txt"));

    assert!(!alice_dir.join("a.txt").exists());
    assert_eq!(std::fs::read_to_string(alice_dir.join("a_mr.txt"))?, "bob");
    assert_eq!(std::fs::read_to_string(alice_dir.join("a_mg.txt"))?, "base");
    assert_eq!(std::fs::read_to_string(alice_dir.join("a_mt.txt"))?, "alice");
    // unchanged on both sides, so not a conflict
    assert_eq!(std::fs::read_to_string(alice_dir.join("notes.md"))?, "shared");

    let manifest = common::head_manifest(root, USER, PROJECT);
    assert_eq!(manifest["command"], "merge-out");
    assert_eq!(manifest["parent"][0]["parentId"], bob_head);
    assert_eq!(
        manifest["parent"][0]["parentRepoPath"],
        common::project_path(root, OTHER_USER, PROJECT)
            .join(".depot/.manifests")
            .display()
            .to_string()
    );
    assert_eq!(manifest["parent"][1]["parentId"], alice_head);
    assert_eq!(
        manifest["structure"],
        serde_json::json!([{
            "fromSource": alice_dir.join("a_mr.txt").display().to_string(),
            "fromAncestor": alice_dir.join("a_mg.txt").display().to_string(),
            "fromTarget": alice_dir.join("a_mt.txt").display().to_string(),
        }])
    );

    Ok(())
}
