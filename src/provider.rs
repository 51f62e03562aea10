use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AppConfig;

#[derive(Debug, Clone, Serialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}

/// The single outbound HTTPS call, behind a trait so tests can assert prompt
/// construction and response handling without network access.
pub trait CompletionPort {
    fn complete(&self, request: &CompletionRequest, api_key: &str) -> Result<CompletionResponse>;
}

pub struct HttpCompletionClient {
    agent: ureq::Agent,
    url: String,
}

impl HttpCompletionClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url: url.to_string(),
        }
    }
}

impl CompletionPort for HttpCompletionClient {
    fn complete(&self, request: &CompletionRequest, api_key: &str) -> Result<CompletionResponse> {
        let response = self
            .agent
            .post(&self.url)
            .set("Authorization", &format!("Bearer {api_key}"))
            .set("Content-Type", "application/json")
            .send_json(request);

        let response = response.map_err(|e| match e {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                anyhow::anyhow!("API returned HTTP {code}: {body}")
            }
            ureq::Error::Transport(t) => {
                anyhow::anyhow!("Network error: {t}")
            }
        })?;

        let json: serde_json::Value = response
            .into_json()
            .context("Failed to parse API response as JSON")?;

        serde_json::from_value(json.clone()).with_context(|| {
            format!(
                "Unexpected response shape:\n{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            )
        })
    }
}

/// Build the request from config, make the one attempt, and extract the
/// first choice. {network failure, bad status, malformed body, zero choices}
/// all degrade to `None` with a diagnostic; nothing here is fatal.
pub fn generate(
    client: &dyn CompletionPort,
    cfg: &AppConfig,
    api_key: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> Option<String> {
    let request = CompletionRequest {
        model: cfg.model.clone(),
        messages: vec![
            PromptMessage::system(system_prompt),
            PromptMessage::user(user_prompt),
        ],
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed}")
            .unwrap(),
    );
    spinner.set_message("Generating commit message...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = client.complete(&request, api_key);

    spinner.finish_and_clear();

    match first_choice(result) {
        Ok(message) => Some(message),
        Err(err) => {
            eprintln!(
                "{} commit message generation failed: {:#}",
                "error:".red().bold(),
                err
            );
            None
        }
    }
}

fn first_choice(result: Result<CompletionResponse>) -> Result<String> {
    let response = result?;
    let Some(choice) = response.choices.first() else {
        bail!("API returned zero choices");
    };
    Ok(choice.message.content.trim().to_string())
}
