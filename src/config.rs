use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Service client: "http" (default) or "stub".
    pub service: Option<String>,

    /// Base URL of the code-generation service.
    pub api_base: Option<String>,

    /// Bearer token sent to the service.
    pub api_key: Option<String>,
}

impl Config {
    /// Load config if the file exists, otherwise return Ok(None).
    pub fn load_optional(path: impl AsRef<Path>) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e))
                    .with_context(|| format!("failed to read config: {}", path.display()))
            }
        };

        let s = String::from_utf8(bytes).context("config is not valid UTF-8")?;
        let cfg: Config = toml::from_str(&s)
            .with_context(|| format!("failed to parse TOML: {}", path.display()))?;
        Ok(Some(cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_optional(dir.path().join("config.toml")).unwrap();
        assert!(cfg.is_none());
    }

    #[test]
    fn parses_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "service = \"stub\"\napi_base = \"https://codegen.internal/api/\"\n",
        )
        .unwrap();

        let cfg = Config::load_optional(&path).unwrap().unwrap();
        assert_eq!(cfg.service.as_deref(), Some("stub"));
        assert_eq!(cfg.api_base.as_deref(), Some("https://codegen.internal/api/"));
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "service = [").unwrap();

        let err = Config::load_optional(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
