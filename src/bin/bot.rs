use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use warden::commands::{
    create_all_handlers, CommandContext, CommandRegistry, DiscordCommandSink, SlashCommandPublisher,
};
use warden::core::{Config, EmbedColors};
use warden::database::Database;
use warden::features::lookup::RobloxClient;
use warden::interactions::{CommandInvocation, ComponentAction, SerenityResponder};
use warden::router::{InteractionRouter, RouteOutcome};

struct Handler {
    router: Arc<InteractionRouter>,
    guild_id: Option<GuildId>,
    colors: EmbedColors,
}

impl Handler {
    fn new(router: InteractionRouter, guild_id: Option<GuildId>, colors: EmbedColors) -> Self {
        Handler {
            router: Arc::new(router),
            guild_id,
            colors,
        }
    }

    fn context(&self) -> &Arc<CommandContext> {
        self.router.context()
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if !self.router.claim_startup() {
            info!("🔁 Reconnected to the gateway; commands are already registered");
            return;
        }

        // Public bots are refused
        match ctx.http.get_current_application_info().await {
            Ok(app) if app.bot_public => {
                warn!("⚠️ BOT IS PUBLIC | SHUTTING DOWN");
                std::process::exit(1);
            }
            Ok(_) => {}
            Err(e) => {
                error!("❌ Couldn't fetch application info: {e}");
                std::process::exit(1);
            }
        }

        ctx.http.set_application_id(ready.application.id.0);

        let sink = DiscordCommandSink::new(ctx.http.clone(), self.guild_id);
        self.context().publisher.attach(Arc::new(sink));

        match self.guild_id {
            Some(guild_id) => {
                info!("🔧 Development mode: Registering commands for guild {guild_id}")
            }
            None => info!("🌍 Production mode: Registering commands globally"),
        }

        let catalog = self.context().registry.snapshot();
        match self.context().publisher.publish(&catalog).await {
            Ok(report) if report.skipped.is_empty() => {
                info!("✅ Successfully registered {} slash commands", report.registered);
            }
            Ok(report) => {
                warn!(
                    "⚠️ Registered {} slash commands, skipped: {}",
                    report.registered,
                    report.skipped.join(", ")
                );
            }
            // Logged by the publisher
            Err(_) => {}
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                let invocation = CommandInvocation::from_serenity(&command);
                let responder = SerenityResponder::command(ctx.http.clone(), &command, self.colors);

                match self.router.route_command(&invocation, &responder).await {
                    Ok(RouteOutcome::Ignored) => {}
                    Ok(outcome) => debug!("/{} resolved as {outcome:?}", invocation.name),
                    Err(e) => error!(
                        "Error responding to slash command '{}': {e}",
                        command.data.name
                    ),
                }
            }
            Interaction::MessageComponent(component) => {
                let action = ComponentAction::from_serenity(&component);
                let responder =
                    SerenityResponder::component(ctx.http.clone(), &component, self.colors);

                if let Err(e) = self.router.route_component(&action, &responder).await {
                    error!(
                        "Error responding to component interaction '{}': {e}",
                        component.data.custom_id
                    );
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Warden Discord Bot...");

    let database = Database::new(&config.database_path).await?;

    let registry = Arc::new(CommandRegistry::new(create_all_handlers));
    registry.reload()?;

    let context = Arc::new(CommandContext::new(
        database,
        Arc::new(config.permissions.clone()),
        registry,
        Arc::new(SlashCommandPublisher::new()),
        RobloxClient::new(&config.roblox_api_base)?,
    ));
    let router = InteractionRouter::new(context, config.handler_timeout);

    let guild_id = config.discord_guild_id.map(GuildId);
    let handler = Handler::new(router, guild_id, config.embed_colors);

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
