//! 애플리케이션 유스케이스 모음.

pub mod post_comment;
pub mod run_action;

#[cfg(test)]
pub(crate) mod test_support;
