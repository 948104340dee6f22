pub mod contributors;
pub mod pipeline;

pub use contributors::{rank_contributors, RankingOptions};
pub use pipeline::ReportPipeline;
