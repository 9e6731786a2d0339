//! GitHub Actions 워크플로 명령 리포터 어댑터.

use crate::application::ports::Reporter;

/// stdout에 `::debug::` 등 워크플로 명령을 출력하는 리포터.
#[derive(Default)]
pub struct ActionsReporter;

impl ActionsReporter {
    fn command(&self, name: &str, message: &str) {
        println!("::{}::{}", name, escape_data(message));
    }
}

impl Reporter for ActionsReporter {
    fn group(&self, name: &str) {
        self.command("group", name);
    }

    fn end_group(&self) {
        println!("::endgroup::");
    }

    fn debug(&self, message: &str) {
        self.command("debug", message);
    }

    fn warning(&self, message: &str) {
        self.command("warning", message);
    }

    fn error(&self, message: &str) {
        self.command("error", message);
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

/// 워크플로 명령 메시지 인코딩(%, CR, LF).
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
