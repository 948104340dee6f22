use futures::future::try_join_all;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::graph::commit_graph::{CommitGraph, EdgeKind, NodeLabel};
use crate::models::{Commit, PullRequest, RepoRef};

const PROGRESS_EVERY: usize = 25;

pub struct CommitGraphBuilder<'a> {
    github: &'a dyn GitHubApi,
    repo: &'a RepoRef,
    history_limit: u32,
}

impl<'a> CommitGraphBuilder<'a> {
    pub fn new(github: &'a dyn GitHubApi, repo: &'a RepoRef, history_limit: u32) -> Self {
        Self {
            github,
            repo,
            history_limit,
        }
    }

    /// Builds the graph from the branch's merged pull request, or from the
    /// branch history when it was never merged through one.
    pub async fn build(&self, branch: &str) -> Result<CommitGraph> {
        match self.github.find_merged_pull_request(self.repo, branch).await? {
            Some(pr) => self.from_merged_pull_request(branch, &pr).await,
            None => {
                tracing::warn!(
                    "No merged pull request for branch '{}', walking branch history instead",
                    branch
                );
                self.from_branch_history(branch).await
            }
        }
    }

    async fn from_merged_pull_request(&self, branch: &str, pr: &PullRequest) -> Result<CommitGraph> {
        let merge_sha = pr
            .merge_commit_sha
            .as_deref()
            .filter(|sha| !sha.is_empty())
            .ok_or_else(|| Error::GitHubApi(format!("PR #{} has no merge_commit_sha", pr.number)))?;
        let base_branch = pr.base_branch();

        tracing::info!(
            "Building commit graph for branch '{}' via merged PR #{}",
            branch,
            pr.number
        );

        let commits = self.github.pull_request_commits(self.repo, pr.number).await?;
        tracing::info!("PR #{} commits fetched: {}", pr.number, commits.len());

        let mut graph = CommitGraph::new();
        let pr_shas: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();

        for (idx, commit) in commits.iter().enumerate() {
            graph.add_node(&commit.sha, NodeLabel::for_commit(commit, branch));

            if (idx + 1) % PROGRESS_EVERY == 0 {
                tracing::info!(
                    "Graph progress: processed {}/{} PR commits",
                    idx + 1,
                    commits.len()
                );
            }
        }

        // Parents outside the PR are where the branch forked off the base
        let mut fork_points = Vec::new();
        for commit in &commits {
            for parent in commit.parent_shas() {
                if !pr_shas.contains(parent) && !fork_points.contains(&parent) {
                    fork_points.push(parent);
                }
            }
        }

        for commit in self.fetch_commits(&fork_points).await? {
            graph.add_node(&commit.sha, NodeLabel::for_commit(&commit, base_branch));
        }

        for commit in &commits {
            for parent in commit.parent_shas() {
                graph.add_edge(&commit.sha, parent, EdgeKind::Parent);
            }
        }

        // Fast-forward merges land the branch tip itself on the base branch
        if pr_shas.contains(merge_sha) {
            tracing::info!(
                "PR #{} was fast-forwarded, {} is already on the graph",
                pr.number,
                crate::models::short_sha(merge_sha)
            );
            return Ok(graph);
        }

        let merge_commit = self.github.commit(self.repo, merge_sha).await?;
        graph.add_node(
            merge_sha,
            NodeLabel::new(&format!("Merge PR #{}", pr.number), base_branch, merge_sha),
        );

        let missing_parents: Vec<&str> = merge_commit
            .parent_shas()
            .filter(|sha| !graph.contains(sha))
            .collect();
        for parent in self.fetch_commits(&missing_parents).await? {
            graph.add_node(&parent.sha, NodeLabel::for_commit(&parent, base_branch));
        }

        for parent in merge_commit.parent_shas() {
            graph.add_edge(merge_sha, parent, EdgeKind::Parent);
        }

        // Squash and rebase merges don't list the branch tip as a parent
        if let Some(tip) = commits.last() {
            if !merge_commit.parent_shas().any(|sha| sha == tip.sha) {
                graph.add_edge(merge_sha, &tip.sha, EdgeKind::Squash);
            }
        }

        Ok(graph)
    }

    async fn from_branch_history(&self, branch: &str) -> Result<CommitGraph> {
        let commits = match self
            .github
            .branch_commits(self.repo, branch, self.history_limit)
            .await
        {
            Ok(commits) => commits,
            Err(Error::NotFound(_)) => return Err(Error::NoMergedPullRequest(branch.to_string())),
            Err(e) => return Err(e),
        };

        if commits.is_empty() {
            return Err(Error::NoMergedPullRequest(branch.to_string()));
        }

        tracing::info!("Branch '{}' commits fetched: {}", branch, commits.len());

        let mut graph = CommitGraph::new();
        let walked: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        for commit in &commits {
            graph.add_node(&commit.sha, NodeLabel::for_commit(commit, branch));
        }

        for commit in &commits {
            for parent in commit.parent_shas().filter(|sha| walked.contains(sha)) {
                graph.add_edge(&commit.sha, parent, EdgeKind::Parent);
            }
        }

        Ok(graph)
    }

    async fn fetch_commits(&self, shas: &[&str]) -> Result<Vec<Commit>> {
        try_join_all(shas.iter().map(|sha| self.github.commit(self.repo, sha))).await
    }
}
