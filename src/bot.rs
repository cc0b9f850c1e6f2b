//! Discord bot runtime and event wiring.

use std::error::Error as StdError;

use log::{debug, error, info};
use poise::{
    Framework, FrameworkOptions,
    serenity_prelude::{ClientBuilder, Context, FullEvent, GatewayIntents},
};

use crate::config::Config;
use crate::error::Result;
use crate::listener::{TRIGGER_PREFIX, handle_message};
use crate::openai::OpenAiClient;

type EventResult = std::result::Result<(), Box<dyn StdError + Send + Sync>>;

/// Read-only state shared by every event handler invocation.
pub struct Data {
    openai_client: OpenAiClient,
    trigger: &'static str,
}

impl Data {
    #[must_use]
    pub fn openai_client(&self) -> &OpenAiClient {
        &self.openai_client
    }

    #[must_use]
    pub fn trigger(&self) -> &str {
        self.trigger
    }
}

/// Run the Discord bot until the gateway closes or a shutdown signal arrives.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing completion client");
    let openai_client = OpenAiClient::new(config.api_token);

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move {
                info!("Bot is now running. Press CTRL-C to exit.");
                Ok(Data {
                    openai_client,
                    trigger: TRIGGER_PREFIX,
                })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;
    let shard_manager = client.shard_manager.clone();

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        () = shutdown_signal() => {
            info!("Shutdown signal received, shutting down...");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> EventResult {
    if let FullEvent::Message { new_message } = event {
        handle_message(ctx, new_message, data).await;
    }
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
