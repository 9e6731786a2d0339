//! Terraform 설치부터 cdktf 실행, 결과 코멘트 게시까지 전체 흐름을 조율하는 유스케이스.

mod messages;

use std::path::PathBuf;

use anyhow::{Context, Error, Result, anyhow};

use crate::application::ports::{
    CdktfInvocation, CdktfRunner, IssueGateway, MarkdownRenderer, Reporter, TerraformInstaller,
};
use crate::application::usecases::post_comment::CommentController;
use crate::domain::event::TriggerContext;
use crate::domain::outcome::StatusMessage;
use crate::domain::run::ActionInputs;

use messages::{failure_message, success_message};

pub struct RunActionUseCase<'a> {
    pub installer: &'a dyn TerraformInstaller,
    pub runner: &'a dyn CdktfRunner,
    pub gateway: &'a dyn IssueGateway,
    pub renderer: &'a dyn MarkdownRenderer,
    pub reporter: &'a dyn Reporter,
    pub inputs: &'a ActionInputs,
    pub context: &'a TriggerContext,
}

impl<'a> RunActionUseCase<'a> {
    /// 액션 본 실행 진입점.
    /// 실행 실패 시 실패 코멘트를 게시한 뒤 같은 오류를 반환한다.
    pub async fn execute(&self) -> Result<()> {
        let run = &self.inputs.run;
        self.reporter
            .debug(&format!("Running action in '{}' mode", run.mode));
        self.inputs.validate()?;

        self.reporter.debug("Installing terraform");
        let terraform_dir = self
            .installer
            .install(&run.terraform_version)
            .await
            .with_context(|| format!("failed to install terraform {}", run.terraform_version))?;

        let invocation = self.build_invocation(terraform_dir)?;
        self.reporter
            .debug(&format!("Executing: {}", invocation.display_command()));

        self.reporter.group(&format!("cdktf {}", run.mode));
        let result = self.runner.run(&invocation, self.reporter).await;
        self.reporter.end_group();

        match result {
            Ok(out) if out.success => {
                let message =
                    success_message(run.mode, &run.stack_name, &out.output, self.inputs.suppress_output);
                self.post(&message).await?;
                self.reporter.debug("Finished executing");
                Ok(())
            }
            Ok(out) => {
                self.reporter.debug(&format!("Output: {}", out.output));
                let error = anyhow!("The process 'npx' failed with {}", out.status);
                self.report_failure(error, &out.output).await
            }
            Err(error) => self.report_failure(error, "").await,
        }
    }

    fn build_invocation(&self, terraform_dir: PathBuf) -> Result<CdktfInvocation> {
        let working_directory = self.inputs.run.working_directory.trim();
        let token = self.inputs.terraform_cloud_token.trim();

        Ok(CdktfInvocation {
            args: self.inputs.npx_args()?,
            working_directory: (!working_directory.is_empty())
                .then(|| PathBuf::from(working_directory)),
            terraform_dir,
            terraform_cloud_token: (!token.is_empty()).then(|| token.to_string()),
        })
    }

    async fn report_failure(&self, error: Error, output: &str) -> Result<()> {
        let run = &self.inputs.run;
        let message = failure_message(
            run.mode,
            &run.stack_name,
            output,
            &format!("{error:#}"),
            self.inputs.suppress_output,
        );
        self.post(&message).await?;
        Err(error)
    }

    async fn post(&self, message: &StatusMessage) -> Result<()> {
        let controller = CommentController {
            gateway: self.gateway,
            reporter: self.reporter,
            inputs: self.inputs,
            context: self.context,
        };
        controller
            .post_comment_on_pr(&self.renderer.render_status(message))
            .await
    }
}
