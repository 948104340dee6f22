use clap::Parser;

use repograph::config::{Config, PipelineConfig};
use repograph::graph::write_dot;
use repograph::logging::init_logging;
use repograph::output::render_report;
use repograph::{Args, GitHubClient, ReportPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();
    let config = Config::from_args(args)?;

    init_logging(&config.logging)?;

    let github = GitHubClient::new(&config.github_token)?;
    let pipeline = ReportPipeline::new(github, PipelineConfig::from(&config));

    let report = pipeline.build_report().await?;
    let output = render_report(&report, config.format)?;

    if let Some(ref path) = config.output {
        std::fs::write(path, &output)?;
        tracing::info!("Report written to: {}", path.display());
    } else {
        println!("{}", output);
    }

    match config.branch {
        Some(ref branch) => {
            let graph = pipeline.build_commit_graph(branch).await?;
            write_dot(&graph, &config.dot_out_path)?;
        }
        None => tracing::info!("No --branch given, skipping commit graph"),
    }

    tracing::info!("Done.");
    Ok(())
}
