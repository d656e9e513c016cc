use std::sync::Arc;

use clap::Parser;

mod application;
mod domain;
mod infrastructure;

use application::errors::BotError;
use application::services::CommandService;
use domain::entities::CommandRegistry;
use infrastructure::adapters::discord::DiscordBot;
use infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "quote-bot")]
#[command(about = "Discord bot that posts member quotes into a channel", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        tracing::error!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        tracing::error!("Error starting runtime: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = rt.block_on(run_bot(config)) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_bot(config: Config) -> Result<(), BotError> {
    let registry = Arc::new(CommandRegistry::new());

    let mut bot = DiscordBot::new(&config, registry.clone()).await?;

    let commands = CommandService::new(registry);
    commands.load_commands(&config).await;

    bot.start(&commands, config.guild_id()).await?;

    tokio::select! {
        _ = shutdown_signal() => tracing::info!("Shutting down"),
        _ = bot.disconnected() => tracing::warn!("Gateway connection closed"),
    }

    bot.close().await;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
