use crate::common;
use crate::common::command::{PROJECT, USER, database_dir};
use crate::merge::{OTHER_USER, diverged_histories, merge_out_from_bob};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_out_with_missing_artifact_fails(
    database_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = database_dir.path();
    let (_base, alice_head, bob_head) = diverged_histories(root);
    let alice_dir = common::project_path(root, USER, PROJECT);
    let bob_dir = common::project_path(root, OTHER_USER, PROJECT);

    // bob's stored copies of a.txt are gone
    std::fs::remove_dir_all(bob_dir.join(".depot/a.txt"))?;

    merge_out_from_bob(root, bob_head, alice_head)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[IOFailure]"));

    assert_eq!(std::fs::read_to_string(alice_dir.join("a.txt"))?, "alice");
    for variant in ["a_mr.txt", "a_mg.txt", "a_mt.txt"] {
        assert!(!alice_dir.join(variant).exists(), "{} was written", variant);
    }
    assert_eq!(common::head_id(root, USER, PROJECT), alice_head);

    Ok(())
}
