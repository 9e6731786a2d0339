//! terraform-cdk-action library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::run::ActionInputs;
use infrastructure::config::WorkflowEnv;
use interface::composition::AppComposition;

/// 라이브러리 직접 호출용 실행 함수.
pub async fn run(inputs: ActionInputs) -> Result<()> {
    let composition = AppComposition::new(inputs, &WorkflowEnv::from_env())?;
    composition.run_action_usecase().execute().await
}

/// 이미 렌더링된 메시지를 현재 워크플로의 PR 코멘트로 게시한다.
pub async fn post_comment_on_pr(inputs: ActionInputs, message: &str) -> Result<()> {
    let composition = AppComposition::new(inputs, &WorkflowEnv::from_env())?;
    composition
        .comment_controller()
        .post_comment_on_pr(message)
        .await
}
