use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use scenario_builder::cli::commands::{
    generate::GenerateCommand,
    init::InitConfigCommand,
    publish::{CheckTokenCommand, PublishCommand},
    sample::SampleCommand,
    session::{SessionCommand, SessionStart},
    show_how_to_get_work,
};
use scenario_builder::cli::{Cli, Commands};
use scenario_builder::config::ScenarioBuilderConfig;
use scenario_builder::fs::StandardFileSystem;
use scenario_builder::github::GitHubPublisher;
use scenario_builder::telemetry::init_telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    ScenarioBuilderConfig::load_env_file()?;
    // init-config creates the file --config names, so it must not be required to exist yet
    let config_path = match cli.command {
        Some(Commands::InitConfig { .. }) => None,
        _ => cli.config.as_deref(),
    };
    let config = ScenarioBuilderConfig::load(config_path)?;
    init_telemetry(&config.observability)?;
    tracing::debug!(?config, "Configuration loaded");

    let publisher = Arc::new(GitHubPublisher::new(config.github.api_base_url.clone()));

    match cli.command {
        // Default behavior: no subcommand - explain the workflow
        None => tokio::runtime::Runtime::new()?.block_on(async { show_how_to_get_work().await }),
        Some(Commands::New { sample }) => {
            let start = if sample {
                SessionStart::Sample
            } else {
                SessionStart::Blank
            };
            tokio::runtime::Runtime::new()?
                .block_on(async { SessionCommand::new(start, config).execute().await })
        }
        Some(Commands::Review { document }) => tokio::runtime::Runtime::new()?.block_on(async {
            SessionCommand::new(SessionStart::Document(document), config)
                .execute()
                .await
        }),
        Some(Commands::Generate {
            record,
            filename,
            output_dir,
            stdout,
        }) => {
            let output_dir = output_dir.unwrap_or_else(|| config.output.directory.clone());
            tokio::runtime::Runtime::new()?.block_on(async {
                GenerateCommand::new(record, output_dir, Arc::new(StandardFileSystem))
                    .with_filename(filename)
                    .with_stdout(stdout)
                    .execute()
                    .await
            })
        }
        Some(Commands::Sample { document }) => tokio::runtime::Runtime::new()?.block_on(async {
            SampleCommand::new().with_document(document).execute().await
        }),
        Some(Commands::Publish {
            document,
            filename,
            owner,
            repo,
        }) => tokio::runtime::Runtime::new()?.block_on(async {
            PublishCommand::new(document, config.github.clone(), publisher)
                .with_filename(filename)
                .with_repository(owner, repo)
                .execute()
                .await
        }),
        Some(Commands::CheckToken) => tokio::runtime::Runtime::new()?.block_on(async {
            CheckTokenCommand::new(config.github.token.clone(), publisher)
                .execute()
                .await
        }),
        Some(Commands::InitConfig { force }) => tokio::runtime::Runtime::new()?
            .block_on(async { InitConfigCommand::new(cli.config, force).execute().await }),
    }
}
