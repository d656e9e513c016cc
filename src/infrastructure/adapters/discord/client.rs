//! Gateway session wrapper

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{Client, Context, EventHandler, GatewayIntents, Http, Interaction, Ready, ShardManager};
use tokio::task::JoinHandle;

use super::{to_event, DiscordAdapter};
use crate::application::errors::BotError;
use crate::application::messaging::{DispatchOutcome, InteractionDispatcher};
use crate::application::services::CommandService;
use crate::domain::entities::CommandRegistry;
use crate::domain::traits::Bot;
use crate::infrastructure::config::Config;

/// Forwards gateway events into the dispatcher
struct Handler {
    dispatcher: InteractionDispatcher,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("Bot is up as {}", ready.user.name);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(event) = to_event(&interaction) else {
            return;
        };

        let id = event.id.clone();
        let bot: Arc<dyn Bot> = Arc::new(DiscordAdapter::new(ctx.http.clone()));
        match self.dispatcher.dispatch(bot, event).await {
            DispatchOutcome::Handled => {}
            outcome => tracing::trace!(interaction = %id, ?outcome, "Interaction not handled"),
        }
    }
}

/// Discord bot session: the serenity client plus the task running it
pub struct DiscordBot {
    client: Option<Client>,
    http: Arc<Http>,
    shard_manager: Arc<ShardManager>,
    gateway: Option<JoinHandle<()>>,
}

impl DiscordBot {
    pub async fn new(config: &Config, registry: Arc<CommandRegistry>) -> Result<Self, BotError> {
        let handler = Handler {
            dispatcher: InteractionDispatcher::new(registry),
        };

        let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
        let client = Client::builder(&config.bot.token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| BotError::Discord(format!("error creating Discord client: {}", e)))?;

        Ok(Self {
            http: client.http.clone(),
            shard_manager: client.shard_manager.clone(),
            client: Some(client),
            gateway: None,
        })
    }

    pub fn adapter(&self) -> DiscordAdapter {
        DiscordAdapter::new(self.http.clone())
    }

    /// Publish command declarations, then open the gateway connection
    pub async fn start(&mut self, commands: &CommandService, guild_id: Option<&str>) -> Result<(), BotError> {
        let mut client = self
            .client
            .take()
            .ok_or_else(|| BotError::Internal("bot already started".to_string()))?;

        let application = self
            .http
            .get_current_application_info()
            .await
            .map_err(|e| BotError::Discord(format!("error fetching application info: {}", e)))?;
        self.http.set_application_id(application.id);

        match guild_id {
            Some(guild_id) => tracing::info!("Registering commands in guild {}", guild_id),
            None => tracing::info!("Registering commands globally"),
        }
        commands.sync(&self.adapter(), guild_id).await?;

        self.gateway = Some(tokio::spawn(async move {
            if let Err(e) = client.start().await {
                tracing::error!("Gateway connection failed: {}", e);
            }
        }));

        tracing::info!("Bot is now running. Press CTRL-C to exit.");
        Ok(())
    }

    /// Resolves when the gateway task ends on its own
    pub async fn disconnected(&mut self) {
        match self.gateway.as_mut() {
            Some(gateway) => {
                if let Err(e) = gateway.await {
                    tracing::error!("Gateway task panicked: {}", e);
                }
                self.gateway = None;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Close every shard. In-flight handlers are not awaited.
    pub async fn close(self) {
        self.shard_manager.shutdown_all().await;

        if let Some(gateway) = self.gateway {
            if let Err(e) = gateway.await {
                tracing::error!("Gateway task panicked: {}", e);
            }
        }
    }
}
