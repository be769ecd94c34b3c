//! Tools the chat model may call

use serde::Deserialize;
use serde_json::{json, Value};

pub const GET_WEATHER: &str = "get_weather";
pub const SCRAPE_WEBSITE: &str = "scrape_website";

/// Arguments of `get_weather`
#[derive(Debug, Deserialize, PartialEq)]
pub struct WeatherArgs {
    pub location: String,
}

/// Arguments of `scrape_website`
#[derive(Debug, Deserialize, PartialEq)]
pub struct ScrapeArgs {
    pub url: String,
    pub query: String,
}

/// Function-calling schema for every tool, in chat-completions format
pub fn tool_definitions() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": GET_WEATHER,
                "description": "Get weather info for a city",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "location": {
                            "type": "string",
                            "description": "City name"
                        }
                    },
                    "required": ["location"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": SCRAPE_WEBSITE,
                "description": "Scrapes a website and returns relevant content",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "The full URL of the website to scrape"
                        },
                        "query": {
                            "type": "string",
                            "description": "What the user is looking for in the website content"
                        }
                    },
                    "required": ["url", "query"]
                }
            }
        }
    ])
}

/// Canned forecast; there is no weather backend
pub fn get_weather(location: &str) -> String {
    format!("The weather in {} is sunny with a high of 25°C.", location)
}

/// Formats the reply sent back after a tool ran
pub fn tool_reply(name: &str, result: &str) -> String {
    format!("Function `{}` was called:\n{}", name, result)
}
