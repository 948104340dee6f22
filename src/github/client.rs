use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::github::paginator::{Page, Paginator};
use crate::github::retry::{with_retry, RetryPolicy};
use crate::models::{Commit, PullRequest, PullRequestState, Release, RepoRef, Repository};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("repograph/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_policy: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.send(path, query).await?;
        let url = response.url().to_string();
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| Error::ParseError(format!("unexpected response from {}: {}", url, e)))
    }

    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>> {
        let response = self.send(path, query).await?;
        let headers = response.headers().clone();
        let url = response.url().to_string();

        // Empty repositories answer list endpoints with 204.
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Page::from_headers(Vec::new(), &headers));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Page::from_headers(Vec::new(), &headers));
        }

        let items: Vec<T> = serde_json::from_str(&body)
            .map_err(|e| Error::ParseError(format!("unexpected response from {}: {}", url, e)))?;

        Ok(Page::from_headers(items, &headers))
    }

    async fn send(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let client = &self.client;
        let target = url.as_str();
        let operation = format!("GET {}", path);

        with_retry(&self.retry_policy, &operation, move || async move {
            tracing::debug!("GET {} params={:?}", target, query);
            let response = client.get(target).query(query).send().await?;
            check_status(response).await
        })
        .await
    }

    /// Counts the items of a list endpoint with a single `per_page=1` request.
    async fn count_items(&self, path: &str, query: &[(&str, String)]) -> Result<u64> {
        let mut params = query.to_vec();
        params.push(("per_page", "1".to_string()));
        params.push(("page", "1".to_string()));

        let page: Page<serde_json::Value> = self.get_page(path, &params).await?;
        Ok(page.last_page.unwrap_or(page.items.len() as u64))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    match status {
        StatusCode::NOT_FOUND => {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("GitHub API error: GET {} -> {} {}", url, status, body);
            Err(Error::NotFound(url))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            Err(Error::RateLimited(retry_after))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => Err(Error::Transient {
            status: status.as_u16(),
            url,
        }),
        _ => {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("GitHub API error: GET {} -> {} {}", url, status, body);
            Err(Error::Http {
                status: status.as_u16(),
                url,
                body,
            })
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn latest_releases(&self, repo: &RepoRef, count: u32) -> Result<Vec<Release>> {
        let path = format!("{}/releases", repo.api_path());
        tracing::info!("Fetching latest {} releases for {}", count, repo);

        let mut releases: Vec<Release> = self
            .get_json(
                &path,
                &[("per_page", count.to_string()), ("page", "1".to_string())],
            )
            .await?;
        releases.truncate(count as usize);
        Ok(releases)
    }

    async fn repository(&self, repo: &RepoRef) -> Result<Repository> {
        tracing::info!("Fetching repository metadata for {}", repo);
        self.get_json(&repo.api_path(), &[]).await.map_err(|e| match e {
            Error::NotFound(_) => Error::NotFound(format!("repository {}", repo)),
            other => other,
        })
    }

    async fn count_contributors(&self, repo: &RepoRef) -> Result<u64> {
        let path = format!("{}/contributors", repo.api_path());
        let count = self.count_items(&path, &[("anon", "true".to_string())]).await?;
        tracing::debug!("{} has {} contributors", repo, count);
        Ok(count)
    }

    async fn count_pull_requests(&self, repo: &RepoRef, state: PullRequestState) -> Result<u64> {
        let path = format!("{}/pulls", repo.api_path());
        let count = self
            .count_items(&path, &[("state", state.to_string())])
            .await?;
        tracing::debug!("{} has {} pull requests ({})", repo, count, state);
        Ok(count)
    }

    async fn pull_request_page(
        &self,
        repo: &RepoRef,
        state: PullRequestState,
        page: u32,
        per_page: u32,
    ) -> Result<Page<PullRequest>> {
        let path = format!("{}/pulls", repo.api_path());
        self.get_page(
            &path,
            &[
                ("state", state.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn find_merged_pull_request(
        &self,
        repo: &RepoRef,
        branch: &str,
    ) -> Result<Option<PullRequest>> {
        let path = format!("{}/pulls", repo.api_path());
        tracing::info!("Looking up merged pull request for branch '{}'", branch);

        let page: Page<PullRequest> = self
            .get_page(
                &path,
                &[
                    ("state", PullRequestState::Closed.to_string()),
                    ("head", format!("{}:{}", repo.owner, branch)),
                    ("sort", "updated".to_string()),
                    ("direction", "desc".to_string()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;

        Ok(page.items.into_iter().find(PullRequest::is_merged))
    }

    async fn pull_request_commits(&self, repo: &RepoRef, number: u64) -> Result<Vec<Commit>> {
        let path = format!("{}/pulls/{}/commits", repo.api_path(), number);
        Paginator::new(self).fetch_all(&path, &[], PER_PAGE).await
    }

    async fn branch_commits(
        &self,
        repo: &RepoRef,
        branch: &str,
        limit: u32,
    ) -> Result<Vec<Commit>> {
        let path = format!("{}/commits", repo.api_path());
        tracing::info!("Fetching up to {} commits of branch '{}'", limit, branch);
        Paginator::new(self)
            .fetch_limited(&path, &[("sha", branch.to_string())], PER_PAGE, limit)
            .await
    }

    async fn commit(&self, repo: &RepoRef, sha: &str) -> Result<Commit> {
        let path = format!("{}/commits/{}", repo.api_path(), sha);
        tracing::debug!("Fetching commit {}", crate::models::short_sha(sha));
        self.get_json(&path, &[]).await
    }
}
