use super::{CodeGeneration, Provider, ServiceClient};
use futures_core::future::BoxFuture;
use std::time::Duration;

/// Offline service with a fixed provider list that echoes the prompt back
/// as a code comment.
#[derive(Debug, Clone)]
pub struct StubService {
    delay: Duration,
}

impl Default for StubService {
    fn default() -> Self {
        Self::with_delay(Duration::from_millis(300))
    }
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ServiceClient for StubService {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn generate(&self, prompt: String) -> BoxFuture<'static, anyhow::Result<CodeGeneration>> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;

            let mut code = String::from("// [stub service]\n");
            for line in prompt.lines() {
                code.push_str("// ");
                code.push_str(line);
                code.push('\n');
            }
            code.push_str("fn main() {\n    todo!()\n}\n");

            Ok(CodeGeneration {
                code,
                language: Some("rust".to_string()),
                extra: serde_json::Map::new(),
            })
        })
    }

    fn list_providers(&self) -> BoxFuture<'static, anyhow::Result<Vec<Provider>>> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay / 2).await;
            Ok(["stub-fast", "stub-large"]
                .into_iter()
                .map(Provider::new)
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_prompt_lines() {
        let svc = StubService::with_delay(Duration::ZERO);
        let out = svc.generate("add two\nnumbers".to_string()).await.unwrap();
        assert!(out.code.contains("// add two\n// numbers\n"));
        assert_eq!(out.language.as_deref(), Some("rust"));
    }

    #[tokio::test]
    async fn lists_fixed_providers() {
        let svc = StubService::with_delay(Duration::ZERO);
        let ids: Vec<_> = svc
            .list_providers()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["stub-fast", "stub-large"]);
    }
}
