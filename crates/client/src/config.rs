//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::MergePolicy;

use crate::api::DEFAULT_API_URL;

/// Storefront product listing client
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Create and browse product listings", long_about = None)]
pub struct ClientConfig {
    /// Base URL of the product service
    #[arg(long, env = "STOREFRONT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Trust values echoed by the service over the submitted ones
    #[arg(long, env = "STOREFRONT_TRUST_SERVER")]
    pub trust_server: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the product collection and print the table and card views
    List,

    /// Submit a new product, then print the updated views
    Add(AddArgs),
}

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    /// Price as typed; must be a number greater than 0
    #[arg(long, default_value = "")]
    pub price: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub category: String,

    /// Image file to embed as a data URL
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment and CLI arguments
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    pub fn merge_policy(&self) -> MergePolicy {
        if self.trust_server {
            MergePolicy::PreferServer
        } else {
            MergePolicy::PreferDraft
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_command_parses_fields() {
        let config = ClientConfig::try_parse_from([
            "storefront",
            "--api-url",
            "http://localhost:9000",
            "add",
            "--title",
            "Mug",
            "--price",
            "4.5",
            "--image",
            "mug.png",
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.merge_policy(), MergePolicy::PreferDraft);
        match config.command {
            Command::Add(args) => {
                assert_eq!(args.title, "Mug");
                assert_eq!(args.price, "4.5");
                assert_eq!(args.category, "");
                assert_eq!(args.image, Some(PathBuf::from("mug.png")));
            }
            Command::List => panic!("Expected add command"),
        }
    }

    #[test]
    fn trust_server_selects_server_policy() {
        let config =
            ClientConfig::try_parse_from(["storefront", "--trust-server", "list"]).unwrap();
        assert_eq!(config.merge_policy(), MergePolicy::PreferServer);
    }
}
