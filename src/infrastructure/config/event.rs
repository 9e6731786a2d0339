//! 이벤트 payload(JSON) 로더.

use std::fs;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::WorkflowEnv;
use crate::domain::event::{RepoRef, TriggerContext};

/// GITHUB_SHA/GITHUB_REPOSITORY와 이벤트 payload로 트리거 컨텍스트를 만든다.
pub fn load_trigger_context(env: &WorkflowEnv) -> Result<TriggerContext> {
    let Some(sha) = env.sha.clone() else {
        bail!("GITHUB_SHA is not set; this binary must run inside a GitHub Actions workflow");
    };

    let payload = match &env.event_path {
        Some(path) if path.exists() => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read event payload at {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse event payload in {}", path.display()))?
        }
        _ => Value::Object(Default::default()),
    };

    let full_name = env.repository.clone().or_else(|| {
        payload
            .get("repository")
            .and_then(|r| r.get("full_name"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    });
    let Some(full_name) = full_name else {
        bail!("GITHUB_REPOSITORY is not set and the event payload has no repository");
    };
    let repo = RepoRef::parse(&full_name)?;

    Ok(TriggerContext::from_payload(sha, repo, &payload))
}
