use serde::Serialize;
use std::collections::HashSet;

use crate::models::{short_sha, Commit};

/// Longest title shown inside a node, ellipsis included.
pub const MAX_TITLE_LEN: usize = 22;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLabel {
    pub title: String,
    pub lane: String,
    pub short_sha: String,
}

impl NodeLabel {
    pub fn new(title: &str, lane: &str, sha: &str) -> Self {
        let title = compact_title(title);
        Self {
            title: if title.is_empty() {
                short_sha(sha).to_string()
            } else {
                title
            },
            lane: ascii_only(lane),
            short_sha: short_sha(sha).to_string(),
        }
    }

    pub fn for_commit(commit: &Commit, lane: &str) -> Self {
        Self::new(commit.title(), lane, &commit.sha)
    }

    pub fn lines(&self) -> [&str; 3] {
        [&self.title, &self.lane, &self.short_sha]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitNode {
    pub sha: String,
    pub label: NodeLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeKind {
    /// `to` is a git parent of `from`.
    Parent,
    /// `from` is a squash or rebase merge of the branch ending at `to`.
    Squash,
}

/// Directed edge from a commit to the commit it builds on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    nodes: Vec<CommitNode>,
    edges: Vec<CommitEdge>,
    node_index: HashSet<String>,
    edge_index: HashSet<(String, String)>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node unless one with the same sha exists. Returns whether it was added.
    pub fn add_node(&mut self, sha: &str, label: NodeLabel) -> bool {
        if !self.node_index.insert(sha.to_string()) {
            return false;
        }
        self.nodes.push(CommitNode {
            sha: sha.to_string(),
            label,
        });
        true
    }

    /// Adds an edge unless it is a duplicate or a self-loop.
    pub fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) -> bool {
        if from == to {
            return false;
        }
        if !self.edge_index.insert((from.to_string(), to.to_string())) {
            return false;
        }
        self.edges.push(CommitEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        });
        true
    }

    pub fn contains(&self, sha: &str) -> bool {
        self.node_index.contains(sha)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edge_index
            .contains(&(from.to_string(), to.to_string()))
    }

    pub fn nodes(&self) -> &[CommitNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CommitEdge] {
        &self.edges
    }

    pub fn node(&self, sha: &str) -> Option<&CommitNode> {
        self.nodes.iter().find(|n| n.sha == sha)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

}

/// Drops non-ASCII characters so renderers without the right fonts don't
/// print replacement glyphs.
fn ascii_only(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn compact_title(title: &str) -> String {
    let title = ascii_only(title.lines().next().unwrap_or("").trim());
    let title = title.trim();

    if title.len() > MAX_TITLE_LEN {
        format!("{}...", &title[..MAX_TITLE_LEN - 1])
    } else {
        title.to_string()
    }
}
