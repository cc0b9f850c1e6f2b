//! Session listener: turns triggering channel messages into completion requests.

use log::{debug, error, info};
use poise::serenity_prelude::{Context, Message as SerenityMessage};

use crate::bot::Data;
use crate::error::Result;

/// Command prefix that marks a message as a prompt for the relay.
pub const TRIGGER_PREFIX: &str = "/chatgpt";

const EMPTY_RESPONSE_MESSAGE: &str = "Error: The response is empty.";

/// Returns the prompt carried by `content`, or `None` when the message should be ignored.
///
/// The remainder after `trigger` is returned untouched, so `"/chatgpt hi"` yields `" hi"`.
#[must_use]
pub fn extract_prompt<'a>(
    content: &'a str,
    authored_by_self: bool,
    trigger: &str,
) -> Option<&'a str> {
    if authored_by_self {
        return None;
    }
    content.strip_prefix(trigger)
}

/// Text sent back to the channel for a relay outcome.
#[must_use]
pub fn reply_text(result: Result<String>) -> String {
    match result {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                EMPTY_RESPONSE_MESSAGE.to_string()
            } else {
                text.to_string()
            }
        }
        Err(e) => format!("Error: {}", e.user_message()),
    }
}

/// Handle one inbound message: filter, relay, and answer in the same channel.
pub async fn handle_message(ctx: &Context, new_message: &SerenityMessage, data: &Data) {
    info!(
        "Received message: {} from {} in channel {}",
        new_message.content, new_message.author.id, new_message.channel_id
    );

    let bot_user_id = ctx.cache.current_user().id;
    let authored_by_self = new_message.author.id == bot_user_id;

    let Some(prompt) = extract_prompt(&new_message.content, authored_by_self, data.trigger())
    else {
        if authored_by_self {
            debug!("Ignoring message from self");
        } else {
            debug!("Message does not have {} prefix", data.trigger());
        }
        return;
    };

    let result = data.openai_client().complete(prompt).await;
    if let Err(ref e) = result {
        error!(
            "Completion failed for {} in channel {}: {}",
            new_message.author.tag(),
            new_message.channel_id,
            e
        );
    }

    let text = reply_text(result);
    match new_message.channel_id.say(&ctx.http, &text).await {
        Ok(_) => info!("Replied in channel {}: {}", new_message.channel_id, text),
        Err(e) => error!(
            "Error sending message to channel {}: {}",
            new_message.channel_id, e
        ),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::error::BotError;

    #[test]
    fn self_authored_messages_are_ignored() {
        assert_eq!(extract_prompt("/chatgpt hello", true, TRIGGER_PREFIX), None);
        assert_eq!(extract_prompt("anything", true, TRIGGER_PREFIX), None);
    }

    #[test]
    fn messages_without_trigger_are_ignored() {
        assert_eq!(extract_prompt("hello", false, TRIGGER_PREFIX), None);
        assert_eq!(extract_prompt(" /chatgpt hello", false, TRIGGER_PREFIX), None);
        assert_eq!(extract_prompt("/ChatGPT hello", false, TRIGGER_PREFIX), None);
        assert_eq!(extract_prompt("", false, TRIGGER_PREFIX), None);
    }

    #[test]
    fn trigger_is_stripped_and_remainder_kept() {
        assert_eq!(
            extract_prompt("/chatgpt hello", false, TRIGGER_PREFIX),
            Some(" hello")
        );
        assert_eq!(extract_prompt("/chatgpt", false, TRIGGER_PREFIX), Some(""));
    }

    #[test]
    fn response_text_is_trimmed() {
        assert_eq!(reply_text(Ok("  hi  \n".to_string())), "hi");
    }

    #[test]
    fn whitespace_response_yields_empty_message() {
        assert_eq!(
            reply_text(Ok(" \n\t ".to_string())),
            "Error: The response is empty."
        );
        assert_eq!(reply_text(Ok(String::new())), "Error: The response is empty.");
    }

    #[test]
    fn errors_are_reported_as_plain_text() {
        let text = reply_text(Err(BotError::CompletionResponse(
            "No choices in response".to_string(),
        )));
        assert_eq!(text, "Error: No response from ChatGPT.");

        let text = reply_text(Err(BotError::CompletionApi {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::new(),
        }));
        assert!(text.starts_with("Error: "));
    }
}
