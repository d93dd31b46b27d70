//! Ollama transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response, StatusCode};

use crate::{ProviderError, ProviderFuture};

use super::types::{OllamaChatRequest, OllamaChatResponse, OllamaErrorBody};

pub const OLLAMA_HOST_URL: &str = "http://localhost:11434";

pub trait OllamaTransport: Send + Sync + std::fmt::Debug {
    fn chat<'a>(
        &'a self,
        request: OllamaChatRequest,
    ) -> ProviderFuture<'a, Result<OllamaChatResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct OllamaHttpTransport {
    client: Client,
    base_url: String,
}

impl OllamaHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OLLAMA_HOST_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<OllamaErrorBody>(&body)
            .map(|parsed| parsed.error)
            .unwrap_or_else(|_| format!("Ollama request failed with status {status}"));

        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

impl OllamaTransport for OllamaHttpTransport {
    fn chat<'a>(
        &'a self,
        request: OllamaChatRequest,
    ) -> ProviderFuture<'a, Result<OllamaChatResponse, ProviderError>> {
        Box::pin(async move {
            let url = self.endpoint("api/chat");
            let response = self
                .client
                .post(url)
                .json(&request)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ProviderError::timeout(err.to_string())
                    } else if err.is_connect() {
                        ProviderError::unavailable(err.to_string())
                    } else {
                        ProviderError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            response
                .json::<OllamaChatResponse>()
                .await
                .map_err(|err| ProviderError::transport(format!("malformed Ollama response: {err}")))
        })
    }
}
