//! 翻译客户端模块
//!
//! 每次调用只发起一次远程请求，不批量、不缓存、不重试。
//! 任何失败（网络错误、非成功状态码、响应体格式错误、缺少译文字段）
//! 都被吸收并报告为 `TranslationOutcome::Unavailable`。

use crate::error::TranslationError;
use crate::types::{LibreTranslateRequest, LibreTranslateResponse, TranslationConfig, TranslationOutcome};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// 翻译服务接口
///
/// 实现方必须是失败无害的：不返回错误，失败时返回 `Unavailable`。
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslationOutcome;
}

/// LibreTranslate 兼容接口的客户端
///
/// # 示例
///
/// ```no_run
/// use dictionary_exporter::{LibreTranslateClient, TranslationConfig, Translator};
///
/// #[tokio::main]
/// async fn main() {
///     let client = LibreTranslateClient::new(TranslationConfig::default());
///     let outcome = client.translate("manzana", "es", "fr").await;
///     println!("{:?}", outcome);
/// }
/// ```
#[derive(Clone)]
pub struct LibreTranslateClient {
    /// HTTP客户端，用于API调用
    client: Client,
    config: TranslationConfig,
}

impl LibreTranslateClient {
    pub fn new(config: TranslationConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to create configured HTTP client: {}, using default", e);
                Client::new()
            });

        Self { client, config }
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    async fn request(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String, TranslationError> {
        let request = LibreTranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(TranslationError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: LibreTranslateResponse = serde_json::from_str(&body)
            .map_err(|e| TranslationError::Parse(format!("{}: {}", e, body)))?;

        parsed.translated_text.ok_or(TranslationError::MissingText)
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslationOutcome {
        match self.request(text, source_lang, target_lang).await {
            Ok(translated) if !translated.is_empty() => TranslationOutcome::Translated(translated),
            Ok(_) => {
                debug!(source_lang, target_lang, "translation service returned empty text");
                TranslationOutcome::Unavailable
            }
            Err(e) => {
                debug!(source_lang, target_lang, error = %e, "translation unavailable");
                TranslationOutcome::Unavailable
            }
        }
    }
}
