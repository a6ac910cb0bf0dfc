use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::sleep;
use tracing::warn;

use crate::config::AnthropicConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// 429에 한해 추가로 재시도하는 횟수. 백오프는 1초, 2초.
const MAX_RATE_LIMIT_RETRIES: u32 = 2;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("ANTHROPIC_API_KEY가 설정되지 않았습니다.")]
    MissingKey,
    #[error("AI 서비스 오류 ({status})")]
    Upstream { status: u16 },
    #[error("AI 요청 실패: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// text 블록만 이어 붙인다. 다른 종류의 블록은 무시.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect()
    }
}

#[derive(Clone)]
pub struct AnthropicClient {
    http: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(http: Client, config: AnthropicConfig) -> Self {
        Self { http, config }
    }

    pub fn has_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn analysis_model(&self) -> &str {
        &self.config.analysis_model
    }

    pub fn chat_model(&self) -> &str {
        &self.config.chat_model
    }

    pub fn chat_timeout(&self) -> Duration {
        self.config.chat_timeout
    }

    /// Messages API 호출. 429는 백오프 후 재시도하고, 그 외 비정상 응답은
    /// 즉시 `Upstream`으로 올린다.
    pub async fn messages(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<MessagesResponse, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::MissingKey)?;
        let url = format!("{}/v1/messages", self.config.base_url);
        let request = MessagesRequest {
            model,
            max_tokens,
            system,
            messages,
        };

        let mut attempt = 0u32;
        loop {
            let response = self
                .http
                .post(&url)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && attempt < MAX_RATE_LIMIT_RETRIES {
                let delay = Duration::from_secs(1 << attempt);
                warn!(
                    target: "ai",
                    attempt = attempt + 1,
                    delay_secs = delay.as_secs(),
                    "레이트리밋 응답, 재시도 대기"
                );
                sleep(delay).await;
                attempt += 1;
                continue;
            }
            if !status.is_success() {
                return Err(AiError::Upstream {
                    status: status.as_u16(),
                });
            }
            return Ok(response.json().await?);
        }
    }
}
