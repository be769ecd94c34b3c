//! Output module for scrape results
//!
//! This module handles:
//! - The scrape report returned by the crawler
//! - The plain-text line handed to the chat model
//! - JSON export and statistics printing for the CLI

mod report;

pub use report::{
    print_statistics, render_error, render_json, render_report, ScrapeReport, NO_CONTENT_MESSAGE,
};
