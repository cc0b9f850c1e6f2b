use std::env::{self, VarError};

use log::{debug, error, info};

use crate::error::{BotError, Result};

const DISCORD_TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
const API_TOKEN_VAR: &str = "CHAT_GPT_API_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub api_token: String,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let require = |name: &'static str| {
            lookup(name).map_err(|source| {
                error!("Failed to load {name} from environment: {source}");
                BotError::EnvVar { name, source }
            })
        };

        let discord_token = require(DISCORD_TOKEN_VAR)?;
        let api_token = require(API_TOKEN_VAR)?;

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!("API token length: {} characters", api_token.len());

        Ok(Self {
            discord_token,
            api_token,
        })
    }
}
