//! Runtime configuration
//!
//! Values come from the environment and can be overridden by command-line
//! flags:
//!
//! - `DEPOT_ROOT`: database root holding `<user>/<project>` trees (default `./database`)
//! - `DEPOT_USER`: user acting on projects (default `operator`)
//! - `DEPOT_MERGE_BASE`: `first-common-max` (default) or `best-common-ancestor`

use crate::areas::project::Project;
use crate::artifacts::merge::MergeBaseStrategy;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "DEPOT_ROOT";
pub const USER_ENV: &str = "DEPOT_USER";
pub const MERGE_BASE_ENV: &str = "DEPOT_MERGE_BASE";

pub const DEFAULT_ROOT: &str = "database";
pub const DEFAULT_USER: &str = "operator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub user: String,
    pub merge_base: MergeBaseStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: PathBuf::from(DEFAULT_ROOT),
            user: DEFAULT_USER.to_string(),
            merge_base: MergeBaseStrategy::default(),
        }
    }
}

impl Config {
    pub fn load_from_env() -> Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any variable lookup; empty values count as
    /// unset
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        let merge_base = match lookup(MERGE_BASE_ENV) {
            Some(value) => value.parse()?,
            None => defaults.merge_base,
        };

        Ok(Config {
            root: lookup(ROOT_ENV).map(PathBuf::from).unwrap_or(defaults.root),
            user: lookup(USER_ENV).unwrap_or(defaults.user),
            merge_base,
        })
    }

    pub fn with_overrides(
        mut self,
        root: Option<PathBuf>,
        user: Option<String>,
        merge_base: Option<MergeBaseStrategy>,
    ) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        if let Some(user) = user {
            self.user = user;
        }
        if let Some(merge_base) = merge_base {
            self.merge_base = merge_base;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Open one of the configured user's projects
    pub fn project(&self, name: &str, writer: Box<dyn std::io::Write>) -> Result<Project> {
        self.project_of(&self.user, name, writer)
    }

    /// Open a project of any user under the same root
    pub fn project_of(
        &self,
        user: &str,
        name: &str,
        writer: Box<dyn std::io::Write>,
    ) -> Result<Project> {
        Ok(Project::new(&self.root, user, name, writer)?.with_merge_base(self.merge_base))
    }
}
