//! CLI command implementations

pub mod edit;
pub mod search;
pub mod show;

use crate::config::Config;
use crate::service::http::HttpService;
use crate::session::{Identity, MessageLevel, MessageLog};
use crate::sync::Synchronizer;
use anyhow::{Context, Result};
use colored::Colorize;

fn connect(config: &Config, object_type_uri: &str) -> Result<Synchronizer<HttpService>> {
    let service = HttpService::new(&config.server)
        .with_context(|| format!("Failed to create client for {}", config.server.base_url))?;
    Ok(Synchronizer::new(service, Identity::new(object_type_uri)))
}

fn print_messages(log: &MessageLog) {
    for message in log.messages() {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.text.dimmed()),
            MessageLevel::Error => eprintln!("{}", message.text.red()),
        }
    }
}
