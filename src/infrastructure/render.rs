//! PR 상태 코멘트용 Markdown 렌더링 모듈.

use crate::domain::outcome::StatusMessage;

/// 제목, 실행 링크, 접힌 출력 블록 순서로 상태 코멘트 본문을 생성한다.
pub fn render_status_markdown(message: &StatusMessage) -> String {
    let run_link = message
        .run_url
        .as_deref()
        .map(|url| format!("<a target=\"_blank\" href='{url}'>🌍 View run</a>"))
        .unwrap_or_default();

    let details = match message.output.as_deref() {
        Some(output) if !output.is_empty() => format!(
            "<details><summary>{}</summary>\n\n```shell\n{}\n```\n\n</details>",
            message.output_title, output
        ),
        _ => String::new(),
    };

    format!("### {}\n\n{}\n\n{}", message.title, run_link, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_full_message() {
        let message = StatusMessage {
            title: "✅ Successfully planned Terraform CDK Stack 'web'".to_string(),
            run_url: Some("https://app.terraform.io/runs/run-1".to_string()),
            output: Some("Plan: 1 to add".to_string()),
            output_title: "Show Plan".to_string(),
        };

        assert_eq!(
            render_status_markdown(&message),
            "### ✅ Successfully planned Terraform CDK Stack 'web'\n\n\
             <a target=\"_blank\" href='https://app.terraform.io/runs/run-1'>🌍 View run</a>\n\n\
             <details><summary>Show Plan</summary>\n\n```shell\nPlan: 1 to add\n```\n\n</details>"
        );
    }

    #[test]
    fn renders_title_only() {
        let message = StatusMessage {
            title: "✅ Successfully synthesized the Terraform CDK Application".to_string(),
            run_url: None,
            output: None,
            output_title: String::new(),
        };

        assert_eq!(
            render_status_markdown(&message),
            "### ✅ Successfully synthesized the Terraform CDK Application\n\n\n\n"
        );
    }
}
