//! `terraform-cdk-action` 바이너리 진입점.

use terraform_cdk_action::application::ports::Reporter;
use terraform_cdk_action::infrastructure::adapters::ActionsReporter;
use terraform_cdk_action::infrastructure::config::WorkflowEnv;
use terraform_cdk_action::interface::cli::Cli;
use terraform_cdk_action::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    let env = WorkflowEnv::from_env();
    let default_level = if env.runner_debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let inputs = match Cli::parse_inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            ActionsReporter.error(&err.to_string());
            std::process::exit(1);
        }
    };

    let composition = match AppComposition::new(inputs, &env) {
        Ok(composition) => composition,
        Err(err) => {
            ActionsReporter.error(&format!("{err:#}"));
            std::process::exit(1);
        }
    };

    if let Err(err) = composition.run_action_usecase().execute().await {
        composition.reporter().error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
