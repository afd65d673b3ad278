use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home))
}

fn ensure_dir(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))?;
    Ok(path.to_path_buf())
}

fn resolve_config_dir(
    codegen_home: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if let Some(base) = codegen_home {
        return Ok(base.join("config"));
    }
    if let Some(xdg) = xdg_config_home {
        return Ok(xdg.join("codegen"));
    }
    Ok(home_dir()?.join(".config").join("codegen"))
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    let dir = resolve_config_dir(
        env::var_os("CODEGEN_HOME").map(PathBuf::from),
        env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
    )?;
    ensure_dir(&dir)
}
