//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Send contracts to an analysis webhook
#[derive(Parser)]
#[command(name = "contract-desk")]
#[command(about = "contract-desk - Review contracts through your analysis webhook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep settings in memory for this run; the settings file is neither read nor written
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change the webhook settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Check that the webhook answers
    #[command(name = "test-connection")]
    TestConnection {
        /// Webhook URL to probe (defaults to the saved one)
        #[arg(long)]
        url: Option<String>,
    },

    /// Send a contract for analysis
    Analyze {
        /// Contract text to analyze
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File to read the contract from
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// File name to report to the webhook (defaults to the uploaded file's name)
        #[arg(long)]
        file_name: Option<String>,

        /// Webhook URL to use for this run only
        #[arg(long)]
        url: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Show a made-up demo report instead of calling the webhook
        #[arg(long)]
        demo: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the webhook URL and/or API key
    Set {
        #[arg(long)]
        webhook_url: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        /// Keep the change for this run only
        #[arg(long)]
        no_save: bool,
    },
}
