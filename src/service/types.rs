use futures_core::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A backend that can service code-generation requests.
///
/// Only `id` is interpreted; everything else the service sends is kept
/// verbatim in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Human-facing label: the display name when the service sent one.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Generated code as returned by the service. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeGeneration {
    pub code: String,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Remote code-generation service.
pub trait ServiceClient {
    fn name(&self) -> &'static str;

    fn generate(&self, prompt: String) -> BoxFuture<'static, anyhow::Result<CodeGeneration>>;

    fn list_providers(&self) -> BoxFuture<'static, anyhow::Result<Vec<Provider>>>;
}
