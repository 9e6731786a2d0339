//! 모드별 성공/실패 상태 메시지 구성.

use crate::domain::outcome::{StatusMessage, extract_run_url, has_terraform_changes};
use crate::domain::run::ExecutionMode;

pub(super) fn success_message(
    mode: ExecutionMode,
    stack: &str,
    output: &str,
    suppress_output: bool,
) -> StatusMessage {
    match mode {
        ExecutionMode::SynthOnly => bare(
            "✅ Successfully synthesized the Terraform CDK Application".to_string(),
        ),
        ExecutionMode::PlanOnly => {
            let title = if has_terraform_changes(output) {
                format!("✅ Successfully planned Terraform CDK Stack '{stack}'")
            } else {
                format!("🟰 No changes in Terraform CDK Stack '{stack}'")
            };
            with_output(title, output, "Show Plan", true, suppress_output)
        }
        ExecutionMode::AutoApproveApply => {
            let title = if has_terraform_changes(output) {
                format!("✅ Successfully applied Terraform CDK Stack '{stack}'")
            } else {
                format!("🟰 No changes to apply in Terraform CDK Stack '{stack}'")
            };
            with_output(title, output, "Show Run", true, suppress_output)
        }
        ExecutionMode::AutoApproveDestroy => bare(format!(
            "✅ Successfully destroyed the Terraform CDK Application '{stack}'"
        )),
    }
}

pub(super) fn failure_message(
    mode: ExecutionMode,
    stack: &str,
    output: &str,
    error: &str,
    suppress_output: bool,
) -> StatusMessage {
    match mode {
        ExecutionMode::SynthOnly => with_output(
            "❌ Error synthesizing the Terraform CDK Application".to_string(),
            output,
            error,
            false,
            suppress_output,
        ),
        ExecutionMode::PlanOnly => with_output(
            format!("❌ Error planning Terraform CDK Stack '{stack}'"),
            output,
            error,
            true,
            suppress_output,
        ),
        ExecutionMode::AutoApproveApply => with_output(
            format!("❌ Error applying Terraform CDK Stack '{stack}'"),
            output,
            error,
            true,
            suppress_output,
        ),
        ExecutionMode::AutoApproveDestroy => with_output(
            format!("❌ Error destroying the Terraform CDK Application '{stack}'"),
            output,
            error,
            false,
            suppress_output,
        ),
    }
}

fn bare(title: String) -> StatusMessage {
    StatusMessage {
        title,
        run_url: None,
        output: None,
        output_title: String::new(),
    }
}

fn with_output(
    title: String,
    output: &str,
    output_title: &str,
    include_run_url: bool,
    suppress_output: bool,
) -> StatusMessage {
    let run_url = if include_run_url {
        extract_run_url(output)
    } else {
        None
    };
    let output = (!suppress_output && !output.is_empty()).then(|| output.to_string());

    StatusMessage {
        title,
        run_url,
        output,
        output_title: output_title.to_string(),
    }
}
