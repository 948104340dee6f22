#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use repograph::github::{GitHubApi, Page};
use repograph::models::{Commit, PullRequest, PullRequestState, Release, RepoRef, Repository};
use repograph::{Error, Result};

/// In-memory stand-in for the GitHub API.
#[derive(Default)]
pub struct FakeGitHub {
    pub releases: Vec<Release>,
    pub forks: u64,
    pub stars: u64,
    pub contributors: u64,
    pub pull_request_count: u64,
    pub pull_request_pages: Vec<Vec<PullRequest>>,
    pub merged_pull_request: Option<PullRequest>,
    pub pull_request_commits: Vec<Commit>,
    /// `None` means the branch does not exist.
    pub branch_commits: Option<Vec<Commit>>,
    pub commits: HashMap<String, Commit>,
    pub requested_pages: Mutex<Vec<u32>>,
    pub fetched_commits: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn with_commit(mut self, commit: Commit) -> Self {
        self.commits.insert(commit.sha.clone(), commit);
        self
    }
}

pub fn commit(sha: &str, message: &str, parents: &[&str]) -> Commit {
    let parents: Vec<_> = parents.iter().map(|p| json!({"sha": p})).collect();
    serde_json::from_value(json!({
        "sha": sha,
        "commit": {"message": message},
        "parents": parents,
    }))
    .unwrap()
}

pub fn pull_request(number: u64, login: &str, user_type: &str) -> PullRequest {
    serde_json::from_value(json!({
        "number": number,
        "user": {"login": login, "type": user_type},
        "merged_at": "2024-01-01T00:00:00Z",
    }))
    .unwrap()
}

pub fn merged_pull_request(number: u64, merge_sha: &str, base: &str) -> PullRequest {
    serde_json::from_value(json!({
        "number": number,
        "state": "closed",
        "merged_at": "2024-01-01T00:00:00Z",
        "merge_commit_sha": merge_sha,
        "base": {"ref": base},
    }))
    .unwrap()
}

pub fn release(tag: &str) -> Release {
    serde_json::from_value(json!({
        "tag_name": tag,
        "name": tag,
        "published_at": "2024-01-01T00:00:00Z",
    }))
    .unwrap()
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn latest_releases(&self, _repo: &RepoRef, count: u32) -> Result<Vec<Release>> {
        Ok(self.releases.iter().take(count as usize).cloned().collect())
    }

    async fn repository(&self, repo: &RepoRef) -> Result<Repository> {
        Ok(Repository {
            full_name: repo.to_string(),
            description: None,
            default_branch: Some("main".to_string()),
            stargazers_count: self.stars,
            forks_count: self.forks,
        })
    }

    async fn count_contributors(&self, _repo: &RepoRef) -> Result<u64> {
        Ok(self.contributors)
    }

    async fn count_pull_requests(&self, _repo: &RepoRef, _state: PullRequestState) -> Result<u64> {
        Ok(self.pull_request_count)
    }

    async fn pull_request_page(
        &self,
        _repo: &RepoRef,
        _state: PullRequestState,
        page: u32,
        _per_page: u32,
    ) -> Result<Page<PullRequest>> {
        self.requested_pages.lock().unwrap().push(page);
        let index = page as usize - 1;
        Ok(Page {
            items: self.pull_request_pages.get(index).cloned().unwrap_or_default(),
            has_next: index + 1 < self.pull_request_pages.len(),
            last_page: Some(self.pull_request_pages.len() as u64),
        })
    }

    async fn find_merged_pull_request(
        &self,
        _repo: &RepoRef,
        _branch: &str,
    ) -> Result<Option<PullRequest>> {
        Ok(self.merged_pull_request.clone())
    }

    async fn pull_request_commits(&self, _repo: &RepoRef, _number: u64) -> Result<Vec<Commit>> {
        Ok(self.pull_request_commits.clone())
    }

    async fn branch_commits(
        &self,
        _repo: &RepoRef,
        branch: &str,
        limit: u32,
    ) -> Result<Vec<Commit>> {
        match &self.branch_commits {
            Some(commits) => Ok(commits.iter().take(limit as usize).cloned().collect()),
            None => Err(Error::NotFound(format!("branch {}", branch))),
        }
    }

    async fn commit(&self, _repo: &RepoRef, sha: &str) -> Result<Commit> {
        self.fetched_commits.lock().unwrap().push(sha.to_string());
        self.commits
            .get(sha)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("commit {}", sha)))
    }
}
