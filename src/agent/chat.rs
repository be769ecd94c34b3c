//! Chat-completions client with function calling

use crate::agent::AgentError;
use crate::client::{build_service_client, service_url};
use crate::config::ServiceConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the model answered
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// Plain message content, empty when the model sent none
    Text(String),

    /// First tool call of the reply; `arguments` is the raw JSON string and
    /// `content` whatever text accompanied the call
    ToolCall {
        name: String,
        arguments: String,
        content: String,
    },
}

/// Sends single-turn conversations to a hosted chat deployment
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl ChatClient {
    /// Builds a client from the `[chat]` config section
    pub fn new(config: &ServiceConfig) -> crate::Result<Self> {
        Ok(Self {
            client: build_service_client(config)?,
            endpoint: service_url(config, "chat/completions"),
            model: config.deployment.clone(),
        })
    }

    /// Sends one user message along with the tool schema
    ///
    /// # Returns
    ///
    /// * `Ok(ChatReply)` - Text or the first requested tool call
    /// * `Err(AgentError)` - Transport failure, non-2xx status or unreadable body
    pub async fn complete(&self, user_input: &str, tools: &Value) -> Result<ChatReply, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: user_input,
            }],
            tools,
            tool_choice: "auto",
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(AgentError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AgentError::MalformedResponse("response contained no choices".to_string()))?;

        let content = message.content.unwrap_or_default();
        if let Some(call) = message.tool_calls.unwrap_or_default().into_iter().next() {
            tracing::debug!("Model requested tool '{}'", call.function.name);
            return Ok(ChatReply::ToolCall {
                name: call.function.name,
                arguments: call.function.arguments,
                content,
            });
        }

        Ok(ChatReply::Text(content))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    tools: &'a Value,
    tool_choice: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}
