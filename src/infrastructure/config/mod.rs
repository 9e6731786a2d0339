//! GitHub Actions 워크플로 환경 로딩 모듈.
//! 러너가 주입한 `GITHUB_*` 환경변수와 이벤트 payload를 실행 컨텍스트로 변환한다.

mod event;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

use crate::domain::event::TriggerContext;
use crate::infrastructure::vcs::DEFAULT_API_BASE;

pub use event::load_trigger_context;

/// 러너 환경에서 읽은 워크플로 설정.
#[derive(Debug, Clone, Default)]
pub struct WorkflowEnv {
    pub sha: Option<String>,
    pub repository: Option<String>,
    pub event_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub tool_cache: Option<PathBuf>,
    pub github_path: Option<PathBuf>,
    pub runner_debug: bool,
}

impl WorkflowEnv {
    /// 현재 프로세스 환경변수에서 읽는다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 읽는다(빈 문자열은 미설정으로 취급).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            sha: get("GITHUB_SHA"),
            repository: get("GITHUB_REPOSITORY"),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            api_url: get("GITHUB_API_URL"),
            tool_cache: get("RUNNER_TOOL_CACHE").map(PathBuf::from),
            github_path: get("GITHUB_PATH").map(PathBuf::from),
            runner_debug: get("RUNNER_DEBUG").is_some_and(|v| v == "1"),
        }
    }

    /// API 베이스 URL. 미설정이면 github.com 공개 API.
    pub fn api_base(&self) -> Result<String> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_BASE);
        let url = Url::parse(raw).with_context(|| format!("invalid GITHUB_API_URL '{raw}'"))?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    pub fn trigger_context(&self) -> Result<TriggerContext> {
        load_trigger_context(self)
    }
}
