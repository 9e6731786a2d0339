//! 액션 입력 파싱 모듈.
//! 러너는 action 입력을 `INPUT_<NAME>` 환경변수로 넘기며, 로컬 실행 시 같은 값을 플래그로 줄 수 있다.

use clap::Parser;

use crate::domain::run::{
    ActionInputs, DEFAULT_CDKTF_VERSION, DEFAULT_TERRAFORM_VERSION, DEFAULT_WORKING_DIRECTORY,
    InputError, RunConfig, parse_bool_input,
};

#[derive(Debug, Parser)]
#[command(name = "terraform-cdk-action", version)]
#[command(about = "Run Terraform CDK in GitHub Actions and report the result on the pull request")]
pub struct Cli {
    /// The version of CDKTF to use
    #[arg(long, env = "INPUT_CDKTFVERSION", default_value = DEFAULT_CDKTF_VERSION)]
    cdktf_version: String,

    /// The version of Terraform to use
    #[arg(long, env = "INPUT_TERRAFORMVERSION", default_value = DEFAULT_TERRAFORM_VERSION)]
    terraform_version: String,

    /// The directory to use for the project
    #[arg(long, env = "INPUT_WORKINGDIRECTORY", default_value = DEFAULT_WORKING_DIRECTORY)]
    working_directory: String,

    /// synth-only, plan-only, auto-approve-apply or auto-approve-destroy
    #[arg(long, env = "INPUT_MODE")]
    mode: String,

    /// The stack to run / plan (required for every mode except synth-only)
    #[arg(long, env = "INPUT_STACKNAME", default_value = "")]
    stack_name: String,

    /// The Terraform Cloud / Terraform Enterprise token to use
    #[arg(long, env = "INPUT_TERRAFORMCLOUDTOKEN", default_value = "", hide_env_values = true)]
    terraform_cloud_token: String,

    /// The github token to use
    #[arg(long, env = "INPUT_GITHUBTOKEN", default_value = "", hide_env_values = true)]
    github_token: String,

    /// Whether to comment the plan / the status on the PR
    #[arg(long, env = "INPUT_COMMENTONPR", default_value = "true")]
    comment_on_pr: String,

    /// Whether to update the last comment on the PR rather than adding a new comment
    #[arg(long, env = "INPUT_UPDATECOMMENT", default_value = "true")]
    update_comment: String,

    /// Additional CLI arguments passed to npx
    #[arg(long, env = "INPUT_CUSTOMNPXARGS", default_value = "", allow_hyphen_values = true)]
    custom_npx_args: String,

    /// Additional CLI arguments passed to cdktf
    #[arg(long, env = "INPUT_CDKTFARGS", default_value = "", allow_hyphen_values = true)]
    cdktf_args: String,

    /// Whether to suppress the output of the action in PR comments
    #[arg(long, env = "INPUT_SUPPRESSOUTPUT", default_value = "false")]
    suppress_output: String,
}

impl Cli {
    /// 프로세스 인자/환경변수에서 입력값을 읽는다. clap 오류는 clap이 직접 출력하고 종료한다.
    pub fn parse_inputs() -> Result<ActionInputs, InputError> {
        Cli::parse().into_inputs()
    }

    /// 빈 문자열 입력은 기본값으로 취급한다.
    pub fn into_inputs(self) -> Result<ActionInputs, InputError> {
        let run = RunConfig {
            cdktf_version: or_default(self.cdktf_version, DEFAULT_CDKTF_VERSION),
            terraform_version: or_default(self.terraform_version, DEFAULT_TERRAFORM_VERSION),
            working_directory: or_default(self.working_directory, DEFAULT_WORKING_DIRECTORY),
            stack_name: self.stack_name.trim().to_string(),
            mode: self.mode.parse()?,
        };

        Ok(ActionInputs {
            run,
            terraform_cloud_token: self.terraform_cloud_token,
            github_token: self.github_token,
            comment_on_pr: bool_or(&self.comment_on_pr, "commentOnPr", true)?,
            update_comment: bool_or(&self.update_comment, "updateComment", true)?,
            custom_npx_args: self.custom_npx_args,
            cdktf_args: self.cdktf_args,
            suppress_output: bool_or(&self.suppress_output, "suppressOutput", false)?,
        })
    }
}

fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn bool_or(value: &str, name: &str, default: bool) -> Result<bool, InputError> {
    if value.trim().is_empty() {
        return Ok(default);
    }
    parse_bool_input(name, value)
}
