use std::time::Duration;

use thiserror::Error;

use crate::ai::prompt;
use crate::config::Config;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no API key saved; add one in Settings")]
    MissingCredential,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("response contained no generated text")]
    MalformedResponse,
    #[error("this build was compiled without network support")]
    NetworkDisabled,
}

/// Chat-completions client. Endpoint, model, and timeout are injected from
/// config; nothing provider-specific lives in the call path. Calls block,
/// so the app runs them on a worker thread and receives the outcome through
/// the event channel; practice state is never touched from here.
#[derive(Clone, Debug)]
pub struct CaseGenerator {
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl CaseGenerator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.api_endpoint.clone(),
            model: config.api_model.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Generate a case prompt for the given case type and industry.
    /// Returned text is rendered verbatim.
    pub fn generate(
        &self,
        api_key: &str,
        case_name: &str,
        industry_name: &str,
    ) -> Result<String, GenerateError> {
        let messages = serde_json::json!([
            { "role": "system", "content": prompt::SYSTEM_MESSAGE },
            { "role": "user", "content": prompt::case_prompt(case_name, industry_name) },
        ]);
        self.chat(api_key, messages, Some(0.8))
    }

    /// Cheap credential check for the Settings screen.
    pub fn probe(&self, api_key: &str) -> Result<(), GenerateError> {
        let messages = serde_json::json!([
            { "role": "user", "content": prompt::PROBE_MESSAGE },
        ]);
        self.chat(api_key, messages, None).map(|_| ())
    }

    #[cfg(feature = "network")]
    fn chat(
        &self,
        api_key: &str,
        messages: serde_json::Value,
        temperature: Option<f64>,
    ) -> Result<String, GenerateError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GenerateError::MissingCredential);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });
        if let Some(temperature) = temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        let response = client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(GenerateError::MalformedResponse)
    }

    #[cfg(not(feature = "network"))]
    fn chat(
        &self,
        api_key: &str,
        _messages: serde_json::Value,
        _temperature: Option<f64>,
    ) -> Result<String, GenerateError> {
        if api_key.trim().is_empty() {
            return Err(GenerateError::MissingCredential);
        }
        Err(GenerateError::NetworkDisabled)
    }
}

/// Troubleshooting guidance shown under a failed generation.
pub fn troubleshooting(error: &GenerateError) -> Vec<&'static str> {
    match error {
        GenerateError::MissingCredential => vec![
            "Open Settings and save your API key",
        ],
        GenerateError::NetworkDisabled => vec![
            "Rebuild with the default `network` feature enabled",
        ],
        _ => vec![
            "Check the API key saved in Settings is correct",
            "Use \"Test key\" in Settings to verify it",
            "Check the endpoint and model in the config file",
            "Check whether a daily token limit has been exceeded",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected_before_any_request() {
        let generator = CaseGenerator::from_config(&Config::default());
        let result = generator.generate("   ", "Market Entry", "Retail & E-commerce");
        assert_eq!(result.unwrap_err(), GenerateError::MissingCredential);

        let result = generator.probe("");
        assert_eq!(result.unwrap_err(), GenerateError::MissingCredential);
    }

    #[test]
    fn error_messages_are_presentable() {
        let err = GenerateError::Api {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error (401): unauthorized");
        assert!(!troubleshooting(&err).is_empty());
    }
}
