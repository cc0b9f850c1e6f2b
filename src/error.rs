use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Environment variable {name} error: {source}")]
    EnvVar {
        name: &'static str,
        source: std::env::VarError,
    },

    #[error("Completion API error ({status}): {message}")]
    CompletionApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Completion response error: {0}")]
    CompletionResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

impl BotError {
    /// Returns a user-friendly error message suitable for displaying in Discord
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BotError::Serenity(_) => {
                "I'm having trouble communicating with Discord right now. Please try again later.".to_string()
            }
            BotError::EnvVar { .. } => {
                "There's a configuration issue on my end. Please contact the bot administrator.".to_string()
            }
            BotError::CompletionApi { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    "I'm having authentication issues with ChatGPT. Please contact the bot administrator.".to_string()
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    "I've hit my rate limit. Please try again in a few moments.".to_string()
                }
                status if status.is_server_error() => {
                    "ChatGPT is experiencing issues right now. Please try again later.".to_string()
                }
                _ => {
                    "There was an issue with my request to ChatGPT. Please try again or contact the bot administrator.".to_string()
                }
            },
            BotError::CompletionResponse(_) => "No response from ChatGPT.".to_string(),
            BotError::Json(_) => {
                "I received an unexpected response from ChatGPT. Please try again.".to_string()
            }
            BotError::Reqwest(_) => {
                "I'm having network issues. Please try again in a moment.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_has_dedicated_message() {
        let err = BotError::CompletionApi {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
        };
        assert!(err.user_message().contains("rate limit"));
    }

    #[test]
    fn auth_failures_point_to_administrator() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = BotError::CompletionApi {
                status,
                message: String::new(),
            };
            assert!(err.user_message().contains("authentication"));
        }
    }

    #[test]
    fn server_errors_are_reported_as_service_issues() {
        let err = BotError::CompletionApi {
            status: StatusCode::BAD_GATEWAY,
            message: "upstream".to_string(),
        };
        assert!(err.user_message().contains("experiencing issues"));
    }

    #[test]
    fn env_var_error_names_the_variable() {
        let err = BotError::EnvVar {
            name: "DISCORD_BOT_TOKEN",
            source: std::env::VarError::NotPresent,
        };
        assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));
    }
}
