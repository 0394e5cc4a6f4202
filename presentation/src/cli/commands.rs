//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for status listings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Coloured table
    #[default]
    Table,
    /// JSON object keyed by category
    Json,
}

/// On/off argument for category toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    pub fn is_on(self) -> bool {
        self == ToggleState::On
    }
}

/// CLI arguments for quotacap
#[derive(Parser, Debug)]
#[command(name = "quotacap")]
#[command(author, version, about = "Per-category quota caps driven by a generated section file")]
#[command(long_about = r#"
quotacap keeps one quota cap per category. Categories are discovered from the
section headers of another application's generated config file, e.g.

  [Constellation Orion]
  [Constellation Lyra]

The header word ("Constellation") can be overridden by a
`ConstellationWord = <word>` line in the word file.

Configuration files are loaded from (in priority order):
1. QUOTACAP_* environment variables
2. --config <path>     Explicit settings file
3. ./quotacap.toml     Project-level settings
4. ~/.config/quotacap/config.toml   Global settings

Example:
  quotacap generate
  quotacap clamp 6000 --category Orion
  quotacap set-cap Orion 2500
  quotacap toggle Lyra off
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to settings file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of settings files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show settings file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover categories and create their cap entries
    Generate {
        /// Keep retrying immediately until success or the retry budget runs out
        #[arg(long)]
        retry: bool,
    },

    /// Show every category's cap and toggle (default)
    Status {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Apply the cap policy to a raw quota
    #[command(allow_negative_numbers = true)]
    Clamp {
        /// Raw quota value
        value: i64,

        /// Active category (omit when outside any category)
        #[arg(short, long, value_name = "NAME")]
        category: Option<String>,
    },

    /// Reset every category to the default cap and toggle
    Reset,

    /// Set a category's cap (-1 = no cap)
    #[command(allow_negative_numbers = true)]
    SetCap {
        /// Category name
        category: String,
        /// New cap
        value: i64,
    },

    /// Turn a category's cap on or off
    Toggle {
        /// Category name
        category: String,
        /// New state
        #[arg(value_enum)]
        state: ToggleState,
    },

    /// Check whether a value is acceptable as a cap
    #[command(allow_negative_numbers = true)]
    Validate {
        /// Candidate cap
        value: i64,
    },
}
