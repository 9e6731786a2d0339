//! Infrastructure layer
//! 외부 시스템(GitHub API/릴리스 서버/CLI/환경변수)과 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod cdktf;
pub mod config;
pub mod render;
pub mod terraform;
pub mod vcs;
