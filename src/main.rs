use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use habbofutbol::{
    api::HttpTransport,
    config::Config,
    log::setup_tracing,
    session::{FileSessionStore, MemorySessionStore, SessionStore},
    store::Store,
    ClientError,
};

use commands::{dispatch, Cli, Command};

/// The subcommands of the CLI and how each maps onto the store.
mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = setup_tracing() {
        eprintln!("Error trying to setup tracing: {}", e);
    }

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️ Configuration error\n\n{}", e);
            return ExitCode::from(2);
        }
    };

    let result = if cli.ephemeral {
        run(&config, MemorySessionStore::new(), cli.command).await
    } else {
        let sessions = FileSessionStore::new(config.session_file.clone());
        run(&config, sessions, cli.command).await
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one command and tell the user where to go if it ended their session.
async fn run<S>(config: &Config, sessions: S, command: Command) -> Result<bool, ClientError>
where
    S: SessionStore,
{
    let transport = HttpTransport::new(&config.backend_url, config.request_timeout)?;
    let store = Store::new(transport, sessions, config.home_route());

    let logging_out = matches!(command, Command::Logout);
    let succeeded = dispatch(&store, command).await?;

    if let Some(route) = store.take_redirect().await {
        if !logging_out {
            eprintln!("{}", habbofutbol::store::SESSION_EXPIRED);
        }
        println!("→ {}", route);
    }

    Ok(succeeded)
}
