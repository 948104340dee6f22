pub mod builder;
pub mod commit_graph;
pub mod dot;

pub use builder::CommitGraphBuilder;
pub use commit_graph::{CommitEdge, CommitGraph, CommitNode, EdgeKind, NodeLabel};
pub use dot::{render_dot, write_dot};
