//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Answer text followed by numbered suggestions
    #[default]
    Text,
    /// The structured answer with category and expert as JSON
    Json,
}

/// CLI arguments for ev-concierge
#[derive(Parser, Debug)]
#[command(name = "ev-concierge")]
#[command(author, version, about = "Conversational assistant that routes each question to a specialised expert")]
#[command(long_about = r#"
ev-concierge answers questions about electric vehicles. Each question is
classified, routed to one of three experts and answered with a short text
plus suggested follow-up questions.

Experts:
  general      Greetings, general EV questions
  domain       Vehicle range, charging and offers, using product knowledge
  data_lookup  Model-specific figures such as battery capacity

Configuration files are loaded from (in priority order):
1. CONCIERGE_* environment variables
2. --config <path>       Explicit config file
3. ./concierge.toml      Project-level config
4. ~/.config/ev-concierge/config.toml   Global config

Example:
  ev-concierge "What is the range of the E-208?"
  ev-concierge --output json "How long does a home charge take?"
  ev-concierge --chat
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
