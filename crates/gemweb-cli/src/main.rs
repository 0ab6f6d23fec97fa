mod cli;
mod commands;
mod setup;

use std::process::ExitCode;
use std::sync::Arc;

use gemweb_client::GeminiWebClient;
use gemweb_common::GemwebError;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let config = setup::load(args.config.as_deref());
    let level = args.log_level.clone().or_else(|| {
        config
            .as_ref()
            .ok()
            .map(|c| c.logging.level.as_str().to_string())
    });
    setup::init_logging(level.as_deref());

    tracing::debug!("gemweb v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match config {
        Ok(config) => run(args, config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: gemweb_config::GemwebConfig) -> Result<(), GemwebError> {
    let credentials = setup::credentials(&config)?;
    let client = GeminiWebClient::new(credentials, setup::client_config(&config))
        .map_err(commands::client_err)?;
    let persist = setup::persist_path(args.config.as_deref());

    match args.command {
        Command::Ask {
            prompt,
            files,
            resume,
            save_images,
        } => {
            commands::ask(
                &client,
                &prompt,
                &files,
                setup::session_state(&resume),
                save_images.as_deref(),
            )
            .await
        }
        Command::Chat { resume } => {
            commands::run_chat(
                Arc::new(client),
                &config,
                setup::session_state(&resume),
                persist,
            )
            .await
        }
        Command::Rotate => commands::rotate(&client, persist.as_deref()).await,
        Command::Upload { files } => commands::upload(&client, &files).await,
    }
}
