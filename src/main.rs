//! bakery CLI entrypoint
//! Parses command-line arguments and runs server generation.
#![deny(unsafe_code)]

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bakery::application::{ApplicationError, GenerateServerRequest, GenerateServerUseCase};
use bakery::generation::GenerationOrchestrator;
use bakery::infrastructure::{openapi::CompositeOpenApiLoader, output::FileSystemOutputService};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bakery")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path or URL to the OpenAPI description (YAML or JSON)
    input: String,
    /// Output directory for the generated project
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Write into a non-empty output directory
    #[arg(short, long)]
    force: bool,
    /// Base URL of the target API, replacing the first server URL of the description
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<ApplicationError>()
                .map(ApplicationError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let use_case = GenerateServerUseCase::new(
        Arc::new(CompositeOpenApiLoader::new()),
        Arc::new(GenerationOrchestrator::default()),
        Arc::new(FileSystemOutputService::new()),
    );

    let request = GenerateServerRequest {
        input: cli.input,
        output_dir: cli.output_dir,
        force: cli.force,
        base_url: cli.base_url,
    };

    let response = use_case
        .execute(request)
        .await
        .context("Server generation failed")?;

    info!(
        "Generated {} tools into {} ({} files)",
        response.tools_count,
        response.output_path.display(),
        response.artifacts_count
    );
    Ok(())
}
