//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::event::RepoRef;
use crate::domain::outcome::{CommandOutput, CommentPage, IssueComment, StatusMessage};

/// 이슈/PR 호스트(GitHub) 연동 포트.
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// 검색 쿼리에 매칭되는 이슈/PR 번호를 호스트 순서대로 반환
    async fn search_issue_numbers(&self, query: &str) -> Result<Vec<u64>>;
    /// 코멘트 목록의 한 페이지 조회 (page는 1부터)
    async fn list_comments_page(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        page: u32,
    ) -> Result<CommentPage>;
    async fn create_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<IssueComment>;
    async fn update_comment(
        &self,
        repo: &RepoRef,
        comment_id: &str,
        body: &str,
    ) -> Result<IssueComment>;
}

/// 요청 버전의 Terraform 바이너리를 설치하고 그 디렉터리를 반환하는 포트.
#[async_trait]
pub trait TerraformInstaller: Send + Sync {
    async fn install(&self, version: &str) -> Result<PathBuf>;
}

/// 실행할 `npx` 호출 명세.
#[derive(Debug, Clone)]
pub struct CdktfInvocation {
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
    pub terraform_dir: PathBuf,
    pub terraform_cloud_token: Option<String>,
}

impl CdktfInvocation {
    pub fn display_command(&self) -> String {
        let mut out = String::from("npx");
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }
}

/// cdktf CLI 실행 포트.
#[async_trait]
pub trait CdktfRunner: Send + Sync {
    /// 프로세스 종료 코드와 무관하게 캡처된 출력을 반환한다.
    /// 실행 자체가 불가능한 경우에만 Err.
    async fn run(&self, invocation: &CdktfInvocation, reporter: &dyn Reporter)
    -> Result<CommandOutput>;
}

/// PR 코멘트 마크다운 렌더링 포트.
pub trait MarkdownRenderer: Send + Sync {
    fn render_status(&self, message: &StatusMessage) -> String;
}

/// 워크플로 로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn group(&self, name: &str);
    fn end_group(&self);
    fn debug(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn raw(&self, line: &str);
}
