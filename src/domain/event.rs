//! 워크플로 트리거 이벤트를 PR 해석용 컨텍스트로 변환하는 모듈.

use anyhow::{Result, bail};
use serde_json::Value;

/// `owner/repo` 형태의 저장소 식별자.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn parse(full_name: &str) -> Result<Self> {
        let Some((owner, repo)) = full_name.trim().split_once('/') else {
            bail!("repository must be in 'owner/repo' form, got '{full_name}'");
        };
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            bail!("repository must be in 'owner/repo' form, got '{full_name}'");
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct TriggerContext {
    pub sha: String,
    pub repo: RepoRef,
    /// pull_request 이벤트일 때 payload에 포함된 PR 번호
    pub pull_request_number: Option<u64>,
    /// payload의 repository.full_name (검색 쿼리에 사용)
    pub repository_full_name: Option<String>,
}

impl TriggerContext {
    /// 이벤트 payload에서 PR 번호와 저장소 이름을 읽는다.
    pub fn from_payload(sha: impl Into<String>, repo: RepoRef, payload: &Value) -> Self {
        let pull_request_number = payload
            .get("pull_request")
            .and_then(|pr| pr.get("number"))
            .and_then(Value::as_u64)
            .filter(|n| *n > 0);

        let repository_full_name = payload
            .get("repository")
            .and_then(|r| r.get("full_name"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(ToString::to_string);

        Self {
            sha: sha.into(),
            repo,
            pull_request_number,
            repository_full_name,
        }
    }
}
