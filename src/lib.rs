pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod graph;
pub mod logging;
pub mod models;
pub mod output;

pub use analysis::ReportPipeline;
pub use cli::Args;
pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient};
pub use graph::{CommitGraph, CommitGraphBuilder};
