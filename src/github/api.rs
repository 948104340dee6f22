use async_trait::async_trait;

use crate::error::Result;
use crate::github::paginator::Page;
use crate::models::{Commit, PullRequest, PullRequestState, Release, RepoRef, Repository};

/// The GitHub operations the report pipeline and graph builder rely on.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn latest_releases(&self, repo: &RepoRef, count: u32) -> Result<Vec<Release>>;

    async fn repository(&self, repo: &RepoRef) -> Result<Repository>;

    async fn count_contributors(&self, repo: &RepoRef) -> Result<u64>;

    async fn count_pull_requests(&self, repo: &RepoRef, state: PullRequestState) -> Result<u64>;

    async fn pull_request_page(
        &self,
        repo: &RepoRef,
        state: PullRequestState,
        page: u32,
        per_page: u32,
    ) -> Result<Page<PullRequest>>;

    async fn find_merged_pull_request(
        &self,
        repo: &RepoRef,
        branch: &str,
    ) -> Result<Option<PullRequest>>;

    async fn pull_request_commits(&self, repo: &RepoRef, number: u64) -> Result<Vec<Commit>>;

    async fn branch_commits(&self, repo: &RepoRef, branch: &str, limit: u32)
        -> Result<Vec<Commit>>;

    async fn commit(&self, repo: &RepoRef, sha: &str) -> Result<Commit>;
}
