//! `npx cdktf-cli` 실행기.

use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::application::ports::{CdktfInvocation, CdktfRunner, Reporter};
use crate::domain::outcome::CommandOutput;

/// 로컬 `npx`로 cdktf CLI를 실행하고 stdout/stderr를 도착 순서대로 캡처한다.
pub struct NpxCdktfRunner;

#[async_trait]
impl CdktfRunner for NpxCdktfRunner {
    #[instrument(skip_all, fields(command = %invocation.display_command()))]
    async fn run(
        &self,
        invocation: &CdktfInvocation,
        reporter: &dyn Reporter,
    ) -> Result<CommandOutput> {
        let npx = which::which("npx").context("failed to spawn 'npx': not found in PATH")?;

        let mut cmd = Command::new(npx);
        cmd.args(&invocation.args)
            .env("FORCE_COLOR", "0")
            .env("TF_CLI_ARGS", "-no-color")
            .env("PATH", prepend_path(&invocation.terraform_dir)?)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = invocation.working_directory() {
            cmd.current_dir(dir);
        }
        if let Some(token) = &invocation.terraform_cloud_token {
            cmd.env("TF_TOKEN_app_terraform_io", token);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn '{}'", invocation.display_command()))?;

        let stdout = child.stdout.take().context("failed to open npx stdout")?;
        let stderr = child.stderr.take().context("failed to open npx stderr")?;
        let mut stdout_lines = BufReader::new(stdout).lines();
        let mut stderr_lines = BufReader::new(stderr).lines();

        let mut output = String::new();
        let mut stdout_done = false;
        let mut stderr_done = false;

        // 두 파이프를 동시에 읽어야 한쪽 버퍼가 차서 자식이 멈추지 않는다.
        while !(stdout_done && stderr_done) {
            tokio::select! {
                line = stdout_lines.next_line(), if !stdout_done => {
                    match line.context("failed to read npx stdout")? {
                        Some(line) => {
                            reporter.raw(&line);
                            output.push_str(&line);
                            output.push('\n');
                        }
                        None => stdout_done = true,
                    }
                }
                line = stderr_lines.next_line(), if !stderr_done => {
                    match line.context("failed to read npx stderr")? {
                        Some(line) => {
                            reporter.warning(&line);
                            output.push_str(&line);
                            output.push('\n');
                        }
                        None => stderr_done = true,
                    }
                }
            }
        }

        let status = child.wait().await.context("npx execution failed")?;
        debug!(%status, output_bytes = output.len(), "cdktf finished");

        Ok(CommandOutput {
            output,
            success: status.success(),
            status: status.to_string(),
        })
    }
}

/// 설치된 terraform 디렉터리를 PATH 맨 앞에 둔다.
fn prepend_path(dir: &Path) -> Result<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(current) = env::var_os("PATH") {
        paths.extend(env::split_paths(&current).filter(|p| p != dir));
    }
    env::join_paths(paths).context("terraform directory contains an invalid PATH character")
}
