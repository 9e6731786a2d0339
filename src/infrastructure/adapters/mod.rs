//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod markdown_renderer;
mod reporter;

pub use markdown_renderer::MarkdownRendererAdapter;
pub use reporter::{ActionsReporter, escape_data};
