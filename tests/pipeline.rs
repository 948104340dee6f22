mod common;

use std::sync::Arc;

use common::{pull_request, release, FakeGitHub};
use repograph::analysis::RankingOptions;
use repograph::models::RepoRef;
use repograph::output::{render_report, OutputFormat};
use repograph::{PipelineConfig, ReportPipeline};

fn config() -> PipelineConfig {
    PipelineConfig::new(RepoRef::new("CTFd", "CTFd").unwrap())
}

fn fake() -> FakeGitHub {
    FakeGitHub {
        releases: vec![release("v4"), release("v3"), release("v2"), release("v1")],
        forks: 10,
        stars: 20,
        contributors: 3,
        pull_request_count: 4,
        pull_request_pages: vec![
            vec![
                pull_request(4, "alice", "User"),
                pull_request(3, "dependabot[bot]", "Bot"),
            ],
            vec![pull_request(2, "bob", "User"), pull_request(1, "alice", "User")],
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_build_report() {
    let pipeline = ReportPipeline::new(fake(), config());
    let report = pipeline.build_report().await.unwrap();

    let tags: Vec<_> = report.releases.iter().map(|r| r.tag_name.as_str()).collect();
    assert_eq!(tags, vec!["v4", "v3", "v2"]);

    assert_eq!(report.stats.forks, 10);
    assert_eq!(report.stats.stars, 20);
    assert_eq!(report.stats.contributors, 3);
    assert_eq!(report.stats.pull_requests, 4);

    let ranking: Vec<_> = report
        .contributors
        .iter()
        .map(|c| (c.login.as_str(), c.pr_count))
        .collect();
    assert_eq!(ranking, vec![("alice", 2), ("bob", 1), ("dependabot[bot]", 1)]);

    let text = render_report(&report, OutputFormat::Text).unwrap();
    assert!(text.contains("  1. alice: 2\n"));
}

#[tokio::test]
async fn test_build_report_excluding_bots() {
    let mut config = config();
    config.ranking = RankingOptions {
        exclude_bot_users: true,
        merged_only: false,
    };

    let pipeline = ReportPipeline::new(fake(), config);
    let report = pipeline.build_report().await.unwrap();
    assert!(report.contributors.iter().all(|c| c.login != "dependabot[bot]"));
    assert_eq!(report.contributors.len(), 2);
}

#[tokio::test]
async fn test_pull_request_walk_respects_page_cap() {
    let mut config = config();
    config.max_pr_pages = Some(1);

    let github = Arc::new(fake());
    let pipeline = ReportPipeline::with_shared_client(github.clone(), config);
    let prs = pipeline.fetch_pull_requests().await.unwrap();
    assert_eq!(prs.len(), 2);
    assert_eq!(*github.requested_pages.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_pull_request_walk_stops_without_next_link() {
    let github = Arc::new(fake());
    let pipeline = ReportPipeline::with_shared_client(github.clone(), config());
    let prs = pipeline.fetch_pull_requests().await.unwrap();
    let numbers: Vec<_> = prs.iter().map(|pr| pr.number).collect();
    assert_eq!(numbers, vec![4, 3, 2, 1]);
    assert_eq!(*github.requested_pages.lock().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn test_empty_repository() {
    let pipeline = ReportPipeline::new(FakeGitHub::default(), config());
    let report = pipeline.build_report().await.unwrap();
    assert!(report.releases.is_empty());
    assert!(report.contributors.is_empty());
    assert_eq!(report.stats.pull_requests, 0);
}
