use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::release::Release;
use super::repository::{RepoRef, RepoStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorPrCount {
    pub login: String,
    pub pr_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoReport {
    pub repository: RepoRef,
    pub releases: Vec<Release>,
    pub stats: RepoStats,
    pub contributors: Vec<ContributorPrCount>,
    pub merged_only: bool,
    pub generated_at: DateTime<Utc>,
}
