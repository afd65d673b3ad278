mod app;
mod cli;
mod config;
mod notify;
mod paths;
mod service;
mod session;

#[cfg(feature = "tui")]
mod tui;

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let config_dir = paths::config_dir()?;
    let cfg = config::Config::load_optional(config_dir.join("config.toml"))?;
    tracing::debug!(?config_dir, ?cfg, "resolved config");

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let overrides = app::ServiceOverrides {
        service: args.service.clone(),
        api_base: args.api_base.clone(),
    };
    let service = app::build_service(&http, cfg.as_ref(), &overrides)?;

    match args.cmd {
        Some(cli::Command::Providers) => {
            let session = session::GenerationSession::new(service, Arc::new(notify::ConsoleNotifier));
            return app::cmd_providers(&session, &mut std::io::stdout()).await;
        }
        #[cfg(feature = "tui")]
        Some(cli::Command::Tui) => {
            return tui::run_tui(service, args.provider.clone()).await;
        }
        None => {}
    }

    if args.prompt.is_empty() {
        anyhow::bail!("No prompt provided. Try: codegen \"a function that parses dates\" or `codegen providers`");
    }

    let prompt = args.prompt.join(" ");
    let session = session::GenerationSession::new(service, Arc::new(notify::ConsoleNotifier));
    app::cmd_generate(&session, args.provider, prompt, &mut std::io::stdout()).await
}
