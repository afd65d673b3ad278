use super::{CodeGeneration, GenerateRequest, Provider, ServiceClient};
use anyhow::{anyhow, Context};
use futures_core::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/";

/// JSON-over-HTTP code-generation service.
#[derive(Debug, Clone)]
pub struct HttpService {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: Url,
}

impl HttpService {
    pub fn new(http: reqwest::Client, api_base: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        // Url::join drops the last segment unless the base ends in '/'.
        let base = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{api_base}/")
        };
        let api_base =
            Url::parse(&base).with_context(|| format!("invalid service base URL: {api_base}"))?;
        Ok(Self {
            http,
            api_key,
            api_base,
        })
    }

    fn build_url(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.api_base.join(path)?)
    }

    fn headers(&self) -> anyhow::Result<HeaderMap> {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            let v = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| anyhow!(e))?;
            h.insert(AUTHORIZATION, v);
        }
        Ok(h)
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> anyhow::Result<T> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .context("failed to read service response")?;
    decode_body(status, &body)
}

fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> anyhow::Result<T> {
    if !status.is_success() {
        let text = String::from_utf8_lossy(body);
        return Err(anyhow!("service error: HTTP {status}: {text}"));
    }
    serde_json::from_slice(body).context("failed to decode service response")
}

impl ServiceClient for HttpService {
    fn name(&self) -> &'static str {
        "http"
    }

    fn generate(&self, prompt: String) -> BoxFuture<'static, anyhow::Result<CodeGeneration>> {
        let this = self.clone();

        Box::pin(async move {
            let url = this.build_url("llm/generate")?;
            let headers = this.headers()?;
            tracing::debug!(%url, "requesting code generation");

            let resp = this
                .http
                .post(url)
                .headers(headers)
                .json(&GenerateRequest { prompt })
                .send()
                .await
                .context("failed to send generate request")?;

            read_json(resp).await
        })
    }

    fn list_providers(&self) -> BoxFuture<'static, anyhow::Result<Vec<Provider>>> {
        let this = self.clone();

        Box::pin(async move {
            let url = this.build_url("llm/providers")?;
            let headers = this.headers()?;
            tracing::debug!(%url, "listing providers");

            let resp = this
                .http
                .get(url)
                .headers(headers)
                .send()
                .await
                .context("failed to send providers request")?;

            read_json(resp).await
        })
    }
}
