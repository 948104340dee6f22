use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetails,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
    #[serde(default)]
    pub author: Option<CommitAuthorInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitDetails {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthorInfo {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitParent {
    pub sha: String,
}

impl Commit {
    /// First line of the commit message.
    pub fn title(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("").trim()
    }

    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }

    pub fn parent_shas(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(|p| p.sha.as_str())
    }
}

pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
