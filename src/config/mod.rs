//! Configuration module for Site-Gleaner
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use site_gleaner::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("gleaner.toml")).unwrap();
//! println!("Will follow up to {} links", config.scraper.max_links_to_follow);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiFlavor, Config, EmbeddingsConfig, ScraperConfig, ServiceConfig, MAX_EMBEDDING_INPUT_CHARS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, resolve_api_key};
