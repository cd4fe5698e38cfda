//! safely - download and decrypt SendSafely packages
//!
//! The CLI loads configuration, builds the operations context and renders
//! events and results; all work happens in the ops crate.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use safely_config::Config;
use safely_events::EventReceiver;
use safely_net::{NetClient, NetConfig};
use safely_ops::{OperationResult, OpsContextBuilder, OpsCtx};
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    logging::init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting safely v{}", env!("CARGO_PKG_VERSION"));

    // File first, then environment for unset credentials, then CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env();
    apply_cli_config(&mut config, &cli.command);

    let credentials = config.credentials()?;
    let net = NetClient::new(credentials, &NetConfig::from(&config.network))?;

    let (event_sender, event_receiver) = safely_events::channel();
    let ops_ctx = OpsContextBuilder::new()
        .with_net(net)
        .with_event_sender(event_sender)
        .with_config(config)
        .build()?;

    let renderer = OutputRenderer::new(cli.global.json);
    let list_files = matches!(cli.command, Commands::Download(_));
    let mut event_handler = EventHandler::new(cli.global.json, list_files);

    let result =
        execute_command_with_events(cli.command, ops_ctx, event_receiver, &mut event_handler)
            .await?;

    renderer.render_result(&result)?;

    if let OperationResult::Download(report) = &result {
        let failed = report.failed().count();
        if failed > 0 {
            return Err(CliError::PartialFailure {
                failed,
                total: report.files.len(),
            });
        }
    }

    info!("Command completed successfully");
    Ok(())
}

/// Command-line flags take precedence over the `[download]` section
fn apply_cli_config(config: &mut Config, command: &Commands) {
    if let Commands::Download(args) = command {
        if let Some(dir) = &args.output_dir {
            config.download.output_dir.clone_from(dir);
        }
        if let Some(existing) = args.existing_output() {
            config.download.existing = existing;
        }
    }
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, ops_ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(message) = event_receiver.try_recv() {
                    event_handler.handle_event(message);
                }
                return result;
            }

            message = event_receiver.recv() => {
                match message {
                    Some(message) => event_handler.handle_event(message),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

async fn execute_command(command: Commands, ctx: OpsCtx) -> Result<OperationResult, CliError> {
    match command {
        Commands::Whoami => {
            let user = safely_ops::whoami(&ctx).await?;
            Ok(OperationResult::User(user))
        }
        Commands::Info(args) => {
            let summary = safely_ops::package_info(&ctx, &args.url).await?;
            Ok(OperationResult::Package(summary))
        }
        Commands::Download(args) => {
            let output_dir = ctx.config.download.output_dir.clone();
            let report =
                safely_ops::download_package(&ctx, &args.url, &args.files, &output_dir).await?;
            Ok(OperationResult::Download(report))
        }
    }
}
