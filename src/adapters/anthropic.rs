use crate::config::GenerationConfig;
use crate::domain::model::PhotoSource;
use crate::domain::ports::GenerationService;
use crate::utils::error::{HoroscopeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPart<'a> {
    Text { text: &'a str },
    Image { source: ImageSource<'a> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ImageSource<'a> {
    Base64 { media_type: &'a str, data: &'a str },
    Url { url: &'a str },
}

impl<'a> From<&'a PhotoSource> for ImageSource<'a> {
    fn from(photo: &'a PhotoSource) -> Self {
        match photo {
            PhotoSource::Base64 { media_type, data } => ImageSource::Base64 {
                media_type: media_type.as_str(),
                data: data.as_str(),
            },
            PhotoSource::Url { url } => ImageSource::Url { url: url.as_str() },
        }
    }
}

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    anthropic_version: String,
    timeout: Option<Duration>,
}

impl AnthropicClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            anthropic_version: config.anthropic_version.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }

    fn build_body<'a>(&'a self, prompt: &'a str, photo: &'a PhotoSource) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::Image {
                        source: ImageSource::from(photo),
                    },
                ],
            }],
        }
    }
}

/// `content[0].text` of a Messages API reply, if present.
pub fn extract_text(body: &serde_json::Value) -> Option<String> {
    body.pointer("/content/0/text")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[async_trait]
impl GenerationService for AnthropicClient {
    async fn generate_text(&self, prompt: &str, photo: &PhotoSource) -> Result<Option<String>> {
        let body = self.build_body(prompt, photo);

        tracing::debug!("Making generation request to: {} (model {})", self.endpoint, self.model);
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.anthropic_version)
            .json(&body);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Generation response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HoroscopeError::ServiceStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response.json().await?;
        Ok(extract_text(&json))
    }
}

/// Stand-in used when generation is switched off; never produces text.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

#[async_trait]
impl GenerationService for OfflineGenerator {
    async fn generate_text(&self, _prompt: &str, _photo: &PhotoSource) -> Result<Option<String>> {
        tracing::debug!("Generation service disabled, skipping request");
        Ok(None)
    }
}
