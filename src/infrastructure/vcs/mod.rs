//! 이슈/PR 호스트 연동 계층.

pub mod github;

pub use github::{COMMENTS_PER_PAGE, DEFAULT_API_BASE, GitHubClient};
