//! 실행 결과/코멘트 도메인 엔티티.

const NO_CHANGES_MARKER: &str = "No changes. Your infrastructure matches the configuration.";
const RUN_URL_MARKER: &str = "Created speculative Terraform Cloud run:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    pub id: String,
    pub body: String,
}

/// 코멘트 목록의 한 페이지.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<IssueComment>,
    pub has_next: bool,
}

/// cdktf 실행 결과. stdout/stderr는 도착 순서대로 합쳐진다.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub output: String,
    pub success: bool,
    /// 종료 상태 설명(예: "exit status: 1")
    pub status: String,
}

/// PR 코멘트로 렌더링될 상태 메시지.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub title: String,
    pub run_url: Option<String>,
    pub output: Option<String>,
    pub output_title: String,
}

pub fn has_terraform_changes(output: &str) -> bool {
    !output.contains(NO_CHANGES_MARKER)
}

/// Terraform Cloud speculative run 링크를 출력에서 찾는다.
pub fn extract_run_url(output: &str) -> Option<String> {
    let line = output.lines().find(|line| line.contains(RUN_URL_MARKER))?;
    let start = line.find("http").unwrap_or(0);
    Some(line[start..].trim_end().to_string())
}
