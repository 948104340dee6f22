use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Owner/name pair identifying the target repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into().trim().to_string();
        let name = name.into().trim().to_string();

        for (field, value) in [("owner", &owner), ("repo", &name)] {
            if value.is_empty() {
                return Err(Error::Config(format!("repository {} must not be empty", field)));
            }
            if value.contains('/') {
                return Err(Error::Config(format!(
                    "repository {} must not contain '/': {}",
                    field, value
                )));
            }
        }

        Ok(Self { owner, name })
    }

    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub forks: u64,
    pub stars: u64,
    pub contributors: u64,
    pub pull_requests: u64,
}
