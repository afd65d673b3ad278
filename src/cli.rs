use clap::{Parser, Subcommand};

/// Generate code through a remote code-generation service
#[derive(Debug, Parser)]
#[command(name = "codegen")]
#[command(version)]
#[command(about = "Generate code through a remote code-generation service", long_about = None)]
pub struct Args {
    /// Service client: "http" or "stub" (default: config/service or "http")
    #[arg(long = "service")]
    pub service: Option<String>,

    /// Service base URL (default: CODEGEN_API_BASE, config/api_base, or localhost)
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Provider to mark as selected for this run (display only; not sent to the service)
    #[arg(short = 'p', long = "provider", value_name = "ID")]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Prompt text (positional) (used when no subcommand is given)
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available providers and show which one is selected
    Providers,

    /// Run an interactive terminal UI
    #[cfg(feature = "tui")]
    Tui,
}
