use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ec_core::{
    ports::AppDirsPort,
    session::{AppSession, Role},
};
use ec_platform::DirsAppDirsAdapter;
use tokio::io::BufReader;
use tracing::{info, warn};

use ecocycle_lib::{
    bootstrap::{
        apply_env_overrides, init_tracing_subscriber, resolve_config, wire_dependencies,
        WiringOptions,
    },
    cli::{Cli, Commands},
    commands::{ScanCommand, ScanOutcome, TerminalScanEvents},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env is optional
    let _ = dotenvy::dotenv();

    let app_dirs = DirsAppDirsAdapter::new().get_app_dirs();
    let logs_dir = app_dirs.as_ref().ok().map(|dirs| dirs.logs_dir());
    init_tracing_subscriber(logs_dir.as_deref())?;
    if let Err(err) = &app_dirs {
        warn!(error = %err, "application directories unavailable");
    }

    let mut config = resolve_config(cli.config.clone(), app_dirs.as_ref().ok())?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    let language = cli.lang.unwrap_or(config.general.default_language);
    info!(%language, mute = cli.mute, "starting ecocycle");

    let runtime = wire_dependencies(
        &config,
        WiringOptions {
            language,
            mute: cli.mute,
        },
        Arc::new(TerminalScanEvents::new(language)),
    )
    .context("Failed to wire dependencies")?;

    let mut session = AppSession::new(language);
    session.select_role(Some(Role::User));
    session.login()?;

    match cli.command {
        Commands::Scan(args) => {
            let stdin = BufReader::new(tokio::io::stdin());
            let stdout = std::io::stdout();
            let outcome = ScanCommand::new(&runtime, &mut session, stdin, stdout.lock())
                .run(args)
                .await?;
            info!(?outcome, projects = session.completed_projects().len(), "scan finished");
            if let ScanOutcome::ProjectCompleted { name } = outcome {
                println!("{name} ({} projects)", session.completed_projects().len());
            }
        }
    }

    Ok(())
}
