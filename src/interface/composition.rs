//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;

use crate::application::usecases::post_comment::CommentController;
use crate::application::usecases::run_action::RunActionUseCase;
use crate::domain::event::TriggerContext;
use crate::domain::run::ActionInputs;
use crate::infrastructure::adapters::{ActionsReporter, MarkdownRendererAdapter};
use crate::infrastructure::cdktf::NpxCdktfRunner;
use crate::infrastructure::config::WorkflowEnv;
use crate::infrastructure::terraform::HashiCorpReleaseInstaller;
use crate::infrastructure::vcs::GitHubClient;

/// 실행 시점 의존성과 입력값을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    inputs: ActionInputs,
    context: TriggerContext,
    installer: HashiCorpReleaseInstaller,
    runner: NpxCdktfRunner,
    gateway: GitHubClient,
    renderer: MarkdownRendererAdapter,
    reporter: ActionsReporter,
}

impl AppComposition {
    /// 입력값과 워크플로 환경으로 실행 조합을 생성한다.
    pub fn new(inputs: ActionInputs, env: &WorkflowEnv) -> Result<Self> {
        let context = env.trigger_context()?;
        let gateway = GitHubClient::new(env.api_base()?, Some(inputs.github_token.clone()));
        let installer =
            HashiCorpReleaseInstaller::new(env.tool_cache.clone(), env.github_path.clone());

        Ok(Self {
            inputs,
            context,
            installer,
            runner: NpxCdktfRunner,
            gateway,
            renderer: MarkdownRendererAdapter,
            reporter: ActionsReporter,
        })
    }

    pub fn reporter(&self) -> &ActionsReporter {
        &self.reporter
    }

    /// 코멘트 게시 유스케이스를 생성한다.
    pub fn comment_controller(&self) -> CommentController<'_> {
        CommentController {
            gateway: &self.gateway,
            reporter: &self.reporter,
            inputs: &self.inputs,
            context: &self.context,
        }
    }

    /// 액션 실행 유스케이스를 생성한다.
    pub fn run_action_usecase(&self) -> RunActionUseCase<'_> {
        RunActionUseCase {
            installer: &self.installer,
            runner: &self.runner,
            gateway: &self.gateway,
            renderer: &self.renderer,
            reporter: &self.reporter,
            inputs: &self.inputs,
            context: &self.context,
        }
    }
}
