use clap::ValueEnum;

use crate::error::Result;
use crate::models::RepoReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

pub fn render_report(report: &RepoReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format_text(report),
        OutputFormat::Markdown => format_markdown(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    })
}

fn ranking_heading(report: &RepoReport) -> &'static str {
    if report.merged_only {
        "Contributors by number of merged PRs (desc)"
    } else {
        "Contributors by number of PRs (desc)"
    }
}

pub fn format_text(report: &RepoReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nRepository: {}\n", report.repository));

    output.push_str(&format!("\nLatest {} releases:\n", report.releases.len()));
    if report.releases.is_empty() {
        output.push_str("  (none)\n");
    }
    for release in &report.releases {
        output.push_str(&format!(
            "- {} | {} | {}\n",
            release.tag_name,
            release.display_name(),
            release.published_display()
        ));
    }

    output.push_str("\nRepo stats:\n");
    output.push_str(&format!("- forks: {}\n", report.stats.forks));
    output.push_str(&format!("- stars: {}\n", report.stats.stars));
    output.push_str(&format!("- contributors: {}\n", report.stats.contributors));
    output.push_str(&format!(
        "- pull requests (all): {}\n",
        report.stats.pull_requests
    ));

    output.push_str(&format!("\n{}:\n", ranking_heading(report)));
    if report.contributors.is_empty() {
        output.push_str("  (none)\n");
    }
    for (i, row) in report.contributors.iter().enumerate() {
        output.push_str(&format!("{:>3}. {}: {}\n", i + 1, row.login, row.pr_count));
    }

    output
}

pub fn format_markdown(report: &RepoReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Repository Report: {}\n\n", report.repository));

    output.push_str("## Latest Releases\n\n");
    if report.releases.is_empty() {
        output.push_str("_No releases._\n");
    } else {
        output.push_str("| Tag | Name | Published |\n|-----|------|-----------|\n");
        for release in &report.releases {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                release.tag_name,
                release.display_name(),
                release.published_display()
            ));
        }
    }

    output.push_str("\n## Repository Stats\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Forks | {} |\n", report.stats.forks));
    output.push_str(&format!("| Stars | {} |\n", report.stats.stars));
    output.push_str(&format!("| Contributors | {} |\n", report.stats.contributors));
    output.push_str(&format!(
        "| Pull Requests (all) | {} |\n",
        report.stats.pull_requests
    ));

    output.push_str(&format!("\n## {}\n\n", ranking_heading(report)));
    if report.contributors.is_empty() {
        output.push_str("_No pull requests._\n");
    } else {
        output.push_str("| # | Contributor | PRs |\n|---|-------------|-----|\n");
        for (i, row) in report.contributors.iter().enumerate() {
            output.push_str(&format!("| {} | {} | {} |\n", i + 1, row.login, row.pr_count));
        }
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContributorPrCount, Release, RepoRef, RepoStats};
    use chrono::{TimeZone, Utc};

    fn sample_report() -> RepoReport {
        RepoReport {
            repository: RepoRef::new("CTFd", "CTFd").unwrap(),
            releases: vec![Release {
                tag_name: "3.7.0".to_string(),
                name: Some("3.7.0".to_string()),
                published_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
                draft: false,
                prerelease: false,
                html_url: None,
            }],
            stats: RepoStats {
                forks: 2000,
                stars: 5500,
                contributors: 150,
                pull_requests: 1200,
            },
            contributors: vec![
                ContributorPrCount {
                    login: "alice".to_string(),
                    pr_count: 12,
                },
                ContributorPrCount {
                    login: "bob".to_string(),
                    pr_count: 3,
                },
            ],
            merged_only: false,
            generated_at: Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&sample_report());
        assert!(text.contains("\nLatest 1 releases:\n- 3.7.0 | 3.7.0 | 2024-03-01 12:00:00 UTC\n"));
        assert!(text.contains("- forks: 2000\n"));
        assert!(text.contains("- stars: 5500\n"));
        assert!(text.contains("- contributors: 150\n"));
        assert!(text.contains("- pull requests (all): 1200\n"));
        assert!(text.contains("Contributors by number of PRs (desc):\n  1. alice: 12\n  2. bob: 3\n"));
    }

    #[test]
    fn test_format_text_empty_sections() {
        let mut report = sample_report();
        report.releases.clear();
        report.contributors.clear();
        report.merged_only = true;

        let text = format_text(&report);
        assert!(text.contains("Latest 0 releases:\n  (none)\n"));
        assert!(text.contains("Contributors by number of merged PRs (desc):\n  (none)\n"));
    }

    #[test]
    fn test_format_markdown() {
        let markdown = render_report(&sample_report(), OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Repository Report: CTFd/CTFd\n"));
        assert!(markdown.contains("| 3.7.0 | 3.7.0 | 2024-03-01 12:00:00 UTC |"));
        assert!(markdown.contains("| 1 | alice | 12 |"));
        assert!(markdown.contains("*Generated on 2024-03-02 08:30:00 UTC*"));
    }

    #[test]
    fn test_format_json() {
        let json = render_report(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["stars"], 5500);
        assert_eq!(value["contributors"][0]["login"], "alice");
        assert_eq!(value["repository"]["owner"], "CTFd");
    }
}
