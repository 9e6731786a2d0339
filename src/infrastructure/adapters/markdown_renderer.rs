//! Markdown 렌더러 포트 구현 어댑터.

use crate::application::ports::MarkdownRenderer;
use crate::domain::outcome::StatusMessage;
use crate::infrastructure::render;

/// 상태 코멘트 렌더러 어댑터.
pub struct MarkdownRendererAdapter;

impl MarkdownRenderer for MarkdownRendererAdapter {
    fn render_status(&self, message: &StatusMessage) -> String {
        render::render_status_markdown(message)
    }
}
