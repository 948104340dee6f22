use std::collections::HashMap;

use crate::models::{ContributorPrCount, PullRequest};

#[derive(Debug, Clone, Copy, Default)]
pub struct RankingOptions {
    pub exclude_bot_users: bool,
    pub merged_only: bool,
}

/// Ranks pull-request authors by number of pull requests, highest first.
/// Ties are broken by login, case-insensitively.
pub fn rank_contributors(prs: &[PullRequest], options: RankingOptions) -> Vec<ContributorPrCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut skipped_bots = 0;
    let mut skipped_unmerged = 0;

    for pr in prs {
        let Some(user) = pr.user.as_ref() else {
            continue;
        };

        if options.exclude_bot_users && user.is_bot() {
            skipped_bots += 1;
            continue;
        }

        if options.merged_only && !pr.is_merged() {
            skipped_unmerged += 1;
            continue;
        }

        if user.login.is_empty() {
            continue;
        }

        *counts.entry(user.login.as_str()).or_insert(0) += 1;
    }

    tracing::debug!(
        "Processed {} PRs | {} contributors | {} bot PRs skipped | {} unmerged PRs skipped",
        prs.len(),
        counts.len(),
        skipped_bots,
        skipped_unmerged
    );

    let mut ranking: Vec<ContributorPrCount> = counts
        .into_iter()
        .map(|(login, pr_count)| ContributorPrCount {
            login: login.to_string(),
            pr_count,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.pr_count
            .cmp(&a.pr_count)
            .then_with(|| a.login.to_lowercase().cmp(&b.login.to_lowercase()))
            .then_with(|| a.login.cmp(&b.login))
    });

    ranking
}
