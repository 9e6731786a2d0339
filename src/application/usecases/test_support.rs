//! 유스케이스 테스트용 인메모리 포트 구현.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::application::ports::{
    CdktfInvocation, CdktfRunner, IssueGateway, Reporter, TerraformInstaller,
};
use crate::domain::event::{RepoRef, TriggerContext};
use crate::domain::outcome::{CommandOutput, CommentPage, IssueComment};
use crate::domain::run::{ActionInputs, ExecutionMode, RunConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    ListPage(u64, u32),
    Create(u64, String),
    Update(String, String),
}

#[derive(Default)]
pub struct FakeGateway {
    pub search_results: Vec<u64>,
    pub pages: Vec<Vec<IssueComment>>,
    pub fail_writes: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub fn with_pages(pages: Vec<Vec<IssueComment>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IssueGateway for FakeGateway {
    async fn search_issue_numbers(&self, query: &str) -> Result<Vec<u64>> {
        self.record(Call::Search(query.to_string()));
        Ok(self.search_results.clone())
    }

    async fn list_comments_page(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        page: u32,
    ) -> Result<CommentPage> {
        self.record(Call::ListPage(issue_number, page));
        let idx = page as usize - 1;
        Ok(CommentPage {
            comments: self.pages.get(idx).cloned().unwrap_or_default(),
            has_next: idx + 1 < self.pages.len(),
        })
    }

    async fn create_comment(
        &self,
        _repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        if self.fail_writes {
            bail!("create_comment failed (403 Forbidden)");
        }
        self.record(Call::Create(issue_number, body.to_string()));
        Ok(IssueComment {
            id: "new".to_string(),
            body: body.to_string(),
        })
    }

    async fn update_comment(
        &self,
        _repo: &RepoRef,
        comment_id: &str,
        body: &str,
    ) -> Result<IssueComment> {
        if self.fail_writes {
            bail!("update_comment failed (403 Forbidden)");
        }
        self.record(Call::Update(comment_id.to_string(), body.to_string()));
        Ok(IssueComment {
            id: comment_id.to_string(),
            body: body.to_string(),
        })
    }
}

#[derive(Default)]
pub struct FakeInstaller {
    pub installed: Mutex<Vec<String>>,
}

#[async_trait]
impl TerraformInstaller for FakeInstaller {
    async fn install(&self, version: &str) -> Result<PathBuf> {
        self.installed.lock().unwrap().push(version.to_string());
        Ok(PathBuf::from(format!("/tool-cache/terraform/{version}")))
    }
}

/// 미리 정한 결과를 돌려주는 runner. `None`이면 실행 불가 오류를 낸다.
pub struct FakeRunner {
    pub result: Option<CommandOutput>,
    pub invocations: Mutex<Vec<CdktfInvocation>>,
}

impl FakeRunner {
    pub fn succeeding(output: &str) -> Self {
        Self::returning(CommandOutput {
            output: output.to_string(),
            success: true,
            status: "exit status: 0".to_string(),
        })
    }

    pub fn failing(output: &str) -> Self {
        Self::returning(CommandOutput {
            output: output.to_string(),
            success: false,
            status: "exit status: 1".to_string(),
        })
    }

    pub fn unspawnable() -> Self {
        Self {
            result: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    fn returning(output: CommandOutput) -> Self {
        Self {
            result: Some(output),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<CdktfInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl CdktfRunner for FakeRunner {
    async fn run(
        &self,
        invocation: &CdktfInvocation,
        _reporter: &dyn Reporter,
    ) -> Result<CommandOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());
        match &self.result {
            Some(output) => Ok(output.clone()),
            None => bail!("failed to spawn 'npx': No such file or directory"),
        }
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == "warning")
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn push(&self, level: &'static str, line: &str) {
        self.lines.lock().unwrap().push((level, line.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn group(&self, name: &str) {
        self.push("group", name);
    }

    fn end_group(&self) {
        self.push("endgroup", "");
    }

    fn debug(&self, message: &str) {
        self.push("debug", message);
    }

    fn warning(&self, message: &str) {
        self.push("warning", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn raw(&self, line: &str) {
        self.push("raw", line);
    }
}

pub fn default_inputs() -> ActionInputs {
    ActionInputs {
        run: RunConfig {
            cdktf_version: "1.4.0".to_string(),
            terraform_version: "1.4.0".to_string(),
            working_directory: "some-directory".to_string(),
            stack_name: "some-stack".to_string(),
            mode: ExecutionMode::PlanOnly,
        },
        terraform_cloud_token: "xxx".to_string(),
        github_token: "xxx".to_string(),
        comment_on_pr: true,
        update_comment: true,
        custom_npx_args: String::new(),
        cdktf_args: String::new(),
        suppress_output: false,
    }
}

pub fn trigger_context(pull_request_number: Option<u64>, full_name: Option<&str>) -> TriggerContext {
    TriggerContext {
        sha: "some-sha".to_string(),
        repo: RepoRef {
            owner: "some-org".to_string(),
            repo: "some-repo".to_string(),
        },
        pull_request_number,
        repository_full_name: full_name.map(ToString::to_string),
    }
}

pub fn tagged(hash: &str, message: &str) -> String {
    format!("<!-- terraform cdk action for options with hash {hash} -->\n{message}")
}
