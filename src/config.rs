use std::env;
use std::path::PathBuf;

use crate::analysis::contributors::RankingOptions;
use crate::cli::Args;
use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use crate::models::RepoRef;
use crate::output::OutputFormat;

const MAX_RELEASES: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub repository: RepoRef,
    pub branch: Option<String>,
    pub logging: LoggingConfig,
    pub dot_out_path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub release_count: u32,
    pub exclude_bot_users: bool,
    pub merged_only: bool,
    pub max_pr_pages: Option<u32>,
    pub max_graph_commits: u32,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        Self::resolve(args, env::var("GITHUB_TOKEN").ok())
    }

    /// Builds the configuration, taking the token from `args` first and
    /// `env_token` second.
    pub fn resolve(args: Args, env_token: Option<String>) -> Result<Self> {
        let github_token = args
            .token
            .or(env_token)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Config("no GitHub token: pass --token or set GITHUB_TOKEN".to_string())
            })?;

        let repository = RepoRef::new(args.owner, args.repo)?;

        if args.releases == 0 || args.releases > MAX_RELEASES {
            return Err(Error::Config(format!(
                "--releases must be between 1 and {}, got {}",
                MAX_RELEASES, args.releases
            )));
        }

        let branch = args
            .branch
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Ok(Self {
            github_token,
            repository,
            branch,
            logging: LoggingConfig {
                destination: args.log_dest,
                file_path: args.log_file_path,
                debug: args.debug,
            },
            dot_out_path: args.dot_out_path,
            format: args.format,
            output: args.output,
            release_count: args.releases,
            exclude_bot_users: args.exclude_bot_users,
            merged_only: args.merged_only,
            max_pr_pages: args.max_pr_pages,
            max_graph_commits: args.max_graph_commits.max(1),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub repository: RepoRef,
    pub release_count: u32,
    pub ranking: RankingOptions,
    pub max_pr_pages: Option<u32>,
    pub max_graph_commits: u32,
}

impl PipelineConfig {
    pub fn new(repository: RepoRef) -> Self {
        Self {
            repository,
            release_count: 3,
            ranking: RankingOptions::default(),
            max_pr_pages: None,
            max_graph_commits: 200,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            repository: config.repository.clone(),
            release_count: config.release_count,
            ranking: RankingOptions {
                exclude_bot_users: config.exclude_bot_users,
                merged_only: config.merged_only,
            },
            max_pr_pages: config.max_pr_pages,
            max_graph_commits: config.max_graph_commits,
        }
    }
}
