pub mod commit;
pub mod pull_request;
pub mod release;
pub mod report;
pub mod repository;

pub use commit::*;
pub use pull_request::*;
pub use release::*;
pub use report::*;
pub use repository::*;
