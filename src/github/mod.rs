pub mod api;
pub mod client;
pub mod paginator;
pub mod retry;

pub use api::GitHubApi;
pub use client::GitHubClient;
pub use paginator::{Page, Paginator};
pub use retry::RetryPolicy;
