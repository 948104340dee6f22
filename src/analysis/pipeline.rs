use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::analysis::contributors::rank_contributors;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::GitHubApi;
use crate::graph::{CommitGraph, CommitGraphBuilder};
use crate::models::{PullRequest, PullRequestState, RepoReport, RepoStats};

const PULL_REQUESTS_PER_PAGE: u32 = 100;

pub struct ReportPipeline {
    github: Arc<dyn GitHubApi>,
    config: PipelineConfig,
}

impl ReportPipeline {
    pub fn new(github: impl GitHubApi + 'static, config: PipelineConfig) -> Self {
        Self::with_shared_client(Arc::new(github), config)
    }

    /// Builds a pipeline over a client the caller keeps a handle to.
    pub fn with_shared_client(github: Arc<dyn GitHubApi>, config: PipelineConfig) -> Self {
        Self { github, config }
    }

    pub async fn build_report(&self) -> Result<RepoReport> {
        let repo = &self.config.repository;
        tracing::info!("Fetching GitHub data for {} ...", repo);

        // Releases and counters are independent requests
        let (releases, stats) = tokio::try_join!(
            self.github.latest_releases(repo, self.config.release_count),
            self.fetch_repo_stats(),
        )?;
        tracing::info!("Fetched {} releases", releases.len());

        let pull_requests = self.fetch_pull_requests().await?;
        let contributors = rank_contributors(&pull_requests, self.config.ranking);
        tracing::info!(
            "Ranked {} contributors from {} pull requests",
            contributors.len(),
            pull_requests.len()
        );

        Ok(RepoReport {
            repository: repo.clone(),
            releases,
            stats,
            contributors,
            merged_only: self.config.ranking.merged_only,
            generated_at: Utc::now(),
        })
    }

    pub async fn fetch_repo_stats(&self) -> Result<RepoStats> {
        let repo = &self.config.repository;

        let (repository, contributors, pull_requests) = tokio::try_join!(
            self.github.repository(repo),
            self.github.count_contributors(repo),
            self.github.count_pull_requests(repo, PullRequestState::All),
        )?;

        Ok(RepoStats {
            forks: repository.forks_count,
            stars: repository.stargazers_count,
            contributors,
            pull_requests,
        })
    }

    /// Walks every pull request page until the last one, or until the
    /// configured page cap is hit.
    pub async fn fetch_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let repo = &self.config.repository;
        let mut all_prs = Vec::new();
        let mut page = 1u32;

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        loop {
            if let Some(max_pages) = self.config.max_pr_pages {
                if page > max_pages {
                    tracing::info!("Stopping PR iteration due to max_pages={}", max_pages);
                    break;
                }
            }

            let result = self
                .github
                .pull_request_page(repo, PullRequestState::All, page, PULL_REQUESTS_PER_PAGE)
                .await?;

            if result.items.is_empty() {
                tracing::info!("No more PRs (page={}). Total fetched={}", page, all_prs.len());
                break;
            }

            tracing::info!(
                "Fetched PR page {}: {} items (fetched so far={})",
                page,
                result.items.len(),
                all_prs.len()
            );
            all_prs.extend(result.items);
            pb.set_message(format!("{} pull requests fetched", all_prs.len()));
            pb.tick();

            if !result.has_next {
                tracing::info!("No next page link. Total fetched={}", all_prs.len());
                break;
            }

            page += 1;
        }

        pb.finish_and_clear();
        Ok(all_prs)
    }

    pub async fn build_commit_graph(&self, branch: &str) -> Result<CommitGraph> {
        CommitGraphBuilder::new(
            self.github.as_ref(),
            &self.config.repository,
            self.config.max_graph_commits,
        )
        .build(branch)
        .await
    }
}
