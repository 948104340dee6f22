use clap::Parser;
use std::path::PathBuf;

use crate::logging::LogDestination;
use crate::output::OutputFormat;

pub const DEFAULT_DOT_OUT_PATH: &str = "graph.dot";

#[derive(Parser, Debug, Clone)]
#[command(name = "repograph")]
#[command(version)]
#[command(about = "Fetch repository stats from GitHub and generate a commit graph")]
pub struct Args {
    /// GitHub personal access token (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Repository owner or organization
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Branch to build the commit graph for
    #[arg(long)]
    pub branch: Option<String>,

    /// Where to write logs
    #[arg(long, value_enum, default_value_t = LogDestination::Stdout)]
    pub log_dest: LogDestination,

    /// Log file path (required with --log-dest=file)
    #[arg(long, required_if_eq("log_dest", "file"))]
    pub log_file_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Output path for the .dot graph file
    #[arg(long, default_value = DEFAULT_DOT_OUT_PATH)]
    pub dot_out_path: PathBuf,

    /// Exclude bot accounts from the contributor ranking
    #[arg(long)]
    pub exclude_bot_users: bool,

    /// Only count merged pull requests in the contributor ranking
    #[arg(long)]
    pub merged_only: bool,

    /// Number of latest releases to show
    #[arg(long, default_value = "3")]
    pub releases: u32,

    /// Maximum pull request pages to walk for the ranking
    #[arg(long)]
    pub max_pr_pages: Option<u32>,

    /// Maximum commits to walk when the branch has no merged pull request
    #[arg(long, default_value = "200")]
    pub max_graph_commits: u32,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Report output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
