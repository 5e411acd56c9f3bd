use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigKey, Overrides};

#[derive(Parser, Debug)]
#[command(name = "shlinkclip", version)]
#[command(about = "Shorten the URL in your clipboard with a Shlink instance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.shlink-clip/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Shlink instance URL for this run
    #[arg(long, global = true)]
    pub instance_url: Option<String>,

    /// API key for this run
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds for this run
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not print notifications
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            instance_url: self.instance_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Shorten the URL in the clipboard and copy the short URL back (default)
    Shorten {
        /// Shorten this text instead of the clipboard contents
        #[arg(long)]
        text: Option<String>,

        /// Also print the short URL on stdout
        #[arg(short, long)]
        print: bool,
    },
    /// Print the first URL found in the clipboard
    Extract {
        /// Look in this text instead of the clipboard contents
        #[arg(long)]
        text: Option<String>,
    },
    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Show the effective settings
    Show,
    /// Print the config file location
    Path,
    /// Set a single value
    Set { key: ConfigKey, value: String },
    /// Prompt for the instance URL and API key
    Init,
}
