//! Tool-calling chat agent
//!
//! The agent forwards a user message to a hosted chat model together with
//! the tool schema. When the model asks for a known tool, the first call is
//! run locally and its result is returned; otherwise the model's text is.

mod chat;
mod tools;

pub use chat::{ChatClient, ChatReply};
pub use tools::{
    get_weather, tool_definitions, tool_reply, ScrapeArgs, WeatherArgs, GET_WEATHER,
    SCRAPE_WEBSITE,
};

use crate::config::Config;
use crate::crawler::Scraper;
use crate::ConfigError;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from one agent turn
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Chat request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Chat service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),

    #[error("Invalid arguments for tool '{name}': {source}")]
    InvalidArguments {
        name: String,
        source: serde_json::Error,
    },
}

/// Answers user messages, scraping websites when the model asks for it
pub struct Agent {
    chat: ChatClient,
    scraper: Scraper,
}

impl Agent {
    pub fn new(chat: ChatClient, scraper: Scraper) -> Self {
        Self { chat, scraper }
    }

    /// Builds an agent from a configuration that has a `[chat]` section
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let chat_config = config.chat.as_ref().ok_or_else(|| {
            ConfigError::Validation("a [chat] section is required to run the agent".to_string())
        })?;

        Ok(Self::new(
            ChatClient::new(chat_config)?,
            Scraper::from_config(config)?,
        ))
    }

    /// Runs one turn for `user_input`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Model text, or the formatted result of the requested tool
    /// * `Err(AgentError)` - Chat failure or undecodable tool arguments
    pub async fn respond(&self, user_input: &str) -> Result<String, AgentError> {
        match self.chat.complete(user_input, &tool_definitions()).await? {
            ChatReply::Text(content) => Ok(content),
            ChatReply::ToolCall {
                name,
                arguments,
                content,
            } => match self.call_tool(&name, &arguments).await? {
                Some(result) => Ok(tool_reply(&name, &result)),
                None => {
                    tracing::warn!("Model requested unknown tool '{}', returning its message", name);
                    Ok(content)
                }
            },
        }
    }

    /// Runs a known tool; `None` for names the agent does not offer
    async fn call_tool(&self, name: &str, arguments: &str) -> Result<Option<String>, AgentError> {
        let result = match name {
            GET_WEATHER => {
                let args: WeatherArgs = decode_arguments(name, arguments)?;
                get_weather(&args.location)
            }
            SCRAPE_WEBSITE => {
                let args: ScrapeArgs = decode_arguments(name, arguments)?;
                self.scraper.scrape_website(&args.url, &args.query).await
            }
            _ => return Ok(None),
        };
        tracing::info!("Dispatched tool '{}'", name);
        Ok(Some(result))
    }
}

/// Runs a single agent turn from a loaded configuration
///
/// # Returns
///
/// * `Ok(String)` - The reply to show the user
/// * `Err(GleanerError)` - Missing `[chat]` section, client construction or the turn failed
pub async fn ask(config: &Config, message: &str) -> crate::Result<String> {
    let agent = Agent::from_config(config)?;
    Ok(agent.respond(message).await?)
}

fn decode_arguments<T: DeserializeOwned>(name: &str, arguments: &str) -> Result<T, AgentError> {
    serde_json::from_str(arguments).map_err(|source| AgentError::InvalidArguments {
        name: name.to_string(),
        source,
    })
}
