#![allow(dead_code)]

pub mod command;
pub mod file;

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Project directory as depot records it: under the canonical root
pub fn project_path(root: &Path, user: &str, project: &str) -> PathBuf {
    root.canonicalize()
        .unwrap_or_else(|e| panic!("Failed to resolve root {:?}: {}", root, e))
        .join(user)
        .join(project)
}

pub fn read_master(root: &Path, user: &str, project: &str) -> Value {
    let master_path = project_path(root, user, project).join(".depot/.master.json");
    let content = std::fs::read_to_string(&master_path)
        .unwrap_or_else(|e| panic!("Failed to read master record {:?}: {}", master_path, e));

    serde_json::from_str(&content).expect("Master record is not valid JSON")
}

pub fn head_id(root: &Path, user: &str, project: &str) -> u64 {
    read_master(root, user, project)["head"]
        .as_u64()
        .expect("Project has no head")
}

pub fn manifest_ids(root: &Path, user: &str, project: &str) -> Vec<u64> {
    read_master(root, user, project)["manifests"]
        .as_object()
        .expect("Master record has no manifests")
        .keys()
        .map(|id| id.parse().expect("Manifest id is not numeric"))
        .collect()
}

pub fn read_manifest(root: &Path, user: &str, project: &str, id: u64) -> Value {
    let manifest_path = project_path(root, user, project)
        .join(".depot/.manifests")
        .join(format!("{}.json", id));
    let content = std::fs::read_to_string(&manifest_path)
        .unwrap_or_else(|e| panic!("Failed to read manifest {:?}: {}", manifest_path, e));

    serde_json::from_str(&content).expect("Manifest is not valid JSON")
}

pub fn head_manifest(root: &Path, user: &str, project: &str) -> Value {
    read_manifest(root, user, project, head_id(root, user, project))
}
