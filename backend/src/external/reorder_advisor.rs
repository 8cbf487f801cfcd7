//! Reorder Advisor Client
//!
//! Client for the prompt-calling service that drafts reorder advice.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ReorderAdvisorConfig;
use crate::error::{AppError, AppResult};

/// Client for the reorder advice prompt endpoint
#[derive(Clone)]
pub struct ReorderAdvisorClient {
    api_endpoint: String,
    api_key: Option<String>,
    http_client: Client,
}

/// Prompt sent to the advisor
#[derive(Debug, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Advisor reply
#[derive(Debug, Deserialize)]
pub struct PromptResponse {
    #[serde(alias = "response", alias = "output")]
    pub text: String,
}

impl ReorderAdvisorClient {
    /// Create a client, or `None` when no endpoint is configured
    pub fn from_config(config: &ReorderAdvisorConfig) -> AppResult<Option<Self>> {
        let Some(api_endpoint) = config.endpoint.clone().filter(|e| !e.is_empty()) else {
            return Ok(None);
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Some(Self {
            api_endpoint,
            api_key: config.api_key.clone(),
            http_client,
        }))
    }

    /// Send a prompt and return the advisor's text
    pub async fn complete(&self, prompt: &str) -> AppResult<String> {
        let mut request = self
            .http_client
            .post(&self.api_endpoint)
            .header("Content-Type", "application/json")
            .json(&PromptRequest {
                prompt: prompt.to_string(),
            });
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ReorderAdvisor(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ReorderAdvisor(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: PromptResponse = response
            .json()
            .await
            .map_err(|e| AppError::ReorderAdvisor(format!("Failed to parse response: {}", e)))?;

        Ok(result.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_advisor_is_none() {
        let config = ReorderAdvisorConfig {
            endpoint: None,
            api_key: None,
            timeout_secs: 5,
        };
        assert!(ReorderAdvisorClient::from_config(&config).unwrap().is_none());

        let blank = ReorderAdvisorConfig {
            endpoint: Some(String::new()),
            ..config
        };
        assert!(ReorderAdvisorClient::from_config(&blank).unwrap().is_none());
    }

    #[test]
    fn test_response_aliases() {
        for body in [
            r#"{"text": "Order 9 reams"}"#,
            r#"{"response": "Order 9 reams"}"#,
            r#"{"output": "Order 9 reams"}"#,
        ] {
            let parsed: PromptResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.text, "Order 9 reams");
        }
    }
}
