use crate::config;
use crate::service::{http::HttpService, http::DEFAULT_API_BASE, stub::StubService};
use crate::session::{GenerationSession, SharedService};
use std::io::Write;
use std::sync::Arc;

/// Command-line overrides applied on top of env and config.
#[derive(Debug, Clone, Default)]
pub struct ServiceOverrides {
    pub service: Option<String>,
    pub api_base: Option<String>,
}

pub fn build_service(
    http: &reqwest::Client,
    cfg: Option<&config::Config>,
    overrides: &ServiceOverrides,
) -> anyhow::Result<SharedService> {
    let name = overrides
        .service
        .clone()
        .or_else(|| cfg.and_then(|c| c.service.clone()))
        .unwrap_or_else(|| "http".to_string());

    match name.as_str() {
        "http" => {
            let api_base = overrides
                .api_base
                .clone()
                .or_else(|| std::env::var("CODEGEN_API_BASE").ok())
                .or_else(|| cfg.and_then(|c| c.api_base.clone()))
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

            let api_key = std::env::var("CODEGEN_API_KEY")
                .ok()
                .or_else(|| cfg.and_then(|c| c.api_key.clone()));

            tracing::debug!(%api_base, has_key = api_key.is_some(), "using http service");
            Ok(Arc::new(HttpService::new(http.clone(), &api_base, api_key)?))
        }
        "stub" => Ok(Arc::new(StubService::new())),
        other => anyhow::bail!("unknown service: {other}"),
    }
}

pub async fn cmd_providers(session: &GenerationSession, out: &mut impl Write) -> anyhow::Result<()> {
    session.load_providers().await;

    let providers = session.providers();
    if providers.is_empty() {
        writeln!(out, "(no providers available)")?;
        return Ok(());
    }

    let selected = session.selected_provider();
    for p in &providers {
        let mark = if p.id == selected { "*" } else { " " };
        if p.label() == p.id {
            writeln!(out, "{mark} {}", p.id)?;
        } else {
            writeln!(out, "{mark} {}\t{}", p.id, p.label())?;
        }
    }
    Ok(())
}

pub async fn cmd_generate(
    session: &GenerationSession,
    provider: Option<String>,
    prompt: String,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    session.load_providers().await;
    if let Some(id) = provider {
        session.set_selected_provider(id);
    }
    tracing::info!(provider = %session.selected_provider(), "generating");

    let Some(generation) = session.generate_code(prompt).await else {
        anyhow::bail!("code generation failed");
    };

    write!(out, "{}", generation.code)?;
    if !generation.code.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
