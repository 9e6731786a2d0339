//! 실행 모드/입력값 도메인 모델.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_CDKTF_VERSION: &str = "0.20.12";
pub const DEFAULT_TERRAFORM_VERSION: &str = "1.12.1";
pub const DEFAULT_WORKING_DIRECTORY: &str = "./";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error(
        "Invalid mode passed: '{0}', needs to be one of 'synth-only', 'plan-only', 'auto-approve-apply', 'auto-approve-destroy'"
    )]
    InvalidMode(String),

    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\nSupport boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    InvalidBoolean { name: String, value: String },

    #[error("Stack name must be provided when running in '{0}' mode")]
    MissingStackName(ExecutionMode),

    #[error("unterminated quote in {name}: {value}")]
    UnterminatedQuote { name: String, value: String },
}

/// 액션이 수행할 CDKTF 명령 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    SynthOnly,
    PlanOnly,
    AutoApproveApply,
    AutoApproveDestroy,
}

impl ExecutionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SynthOnly => "synth-only",
            Self::PlanOnly => "plan-only",
            Self::AutoApproveApply => "auto-approve-apply",
            Self::AutoApproveDestroy => "auto-approve-destroy",
        }
    }

    /// synth 외 모드는 대상 스택 이름이 반드시 필요하다.
    pub fn requires_stack(self) -> bool {
        !matches!(self, Self::SynthOnly)
    }

    /// cdktf CLI 서브커맨드 인자를 구성한다.
    pub fn cdktf_subcommand(self, stack_name: &str) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Self::SynthOnly => args.push("synth".to_string()),
            Self::PlanOnly => {
                args.push("plan".to_string());
                args.push(stack_name.to_string());
            }
            Self::AutoApproveApply => {
                args.push("apply".to_string());
                args.push(stack_name.to_string());
                args.push("--auto-approve".to_string());
            }
            Self::AutoApproveDestroy => {
                args.push("destroy".to_string());
                args.push(stack_name.to_string());
                args.push("--auto-approve".to_string());
            }
        }
        args
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "synth-only" => Ok(Self::SynthOnly),
            "plan-only" => Ok(Self::PlanOnly),
            "auto-approve-apply" => Ok(Self::AutoApproveApply),
            "auto-approve-destroy" => Ok(Self::AutoApproveDestroy),
            other => Err(InputError::InvalidMode(other.to_string())),
        }
    }
}

/// 코멘트 fingerprint 대상이 되는 실행 설정.
/// 직렬화 필드 순서가 곧 해시 입력이므로 순서를 바꾸면 안 된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub cdktf_version: String,
    pub terraform_version: String,
    pub working_directory: String,
    pub stack_name: String,
    pub mode: ExecutionMode,
}

impl RunConfig {
    /// 모드가 요구하는 스택 이름이 있는지 검사한다.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.mode.requires_stack() && self.stack_name.trim().is_empty() {
            return Err(InputError::MissingStackName(self.mode));
        }
        Ok(())
    }
}

/// 진입점에서 한 번 만들어 모든 컴포넌트에 전달하는 액션 입력값.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    pub run: RunConfig,
    pub terraform_cloud_token: String,
    pub github_token: String,
    pub comment_on_pr: bool,
    pub update_comment: bool,
    pub custom_npx_args: String,
    pub cdktf_args: String,
    pub suppress_output: bool,
}

impl ActionInputs {
    /// 부작용이 생기기 전에 확인할 수 있는 입력 오류를 모두 검사한다.
    pub fn validate(&self) -> Result<(), InputError> {
        self.run.validate()?;
        self.npx_args()?;
        Ok(())
    }

    /// `npx` 실행 인자 전체를 구성한다.
    /// npx --yes [customNpxArgs] cdktf-cli@<version> <subcommand> [cdktfArgs]
    pub fn npx_args(&self) -> Result<Vec<String>, InputError> {
        let mut args = vec!["--yes".to_string()];
        args.extend(split_args("customNpxArgs", &self.custom_npx_args)?);
        args.push(format!("cdktf-cli@{}", self.run.cdktf_version));
        args.extend(self.run.mode.cdktf_subcommand(&self.run.stack_name));
        args.extend(split_args("cdktfArgs", &self.cdktf_args)?);
        Ok(args)
    }
}

/// 액션 boolean 입력값을 해석한다.
pub fn parse_bool_input(name: &str, value: &str) -> Result<bool, InputError> {
    match value.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(InputError::InvalidBoolean {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

/// 공백 기준으로 인자를 나누되 작은/큰따옴표로 묶인 구간은 하나로 유지한다.
pub fn split_args(name: &str, raw: &str) -> Result<Vec<String>, InputError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in raw.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(InputError::UnterminatedQuote {
            name: name.to_string(),
            value: raw.to_string(),
        });
    }
    if in_token {
        args.push(current);
    }
    Ok(args)
}
