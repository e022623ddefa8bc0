//! Translator feature
//!
//! Sends the form to the translation backend as a single form-encoded POST.
//! Provider credentials are held by the backend; the client sends none.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::BackendSettings;
use types::{BackendErrorBody, TranslateRequest, TranslateResponse};

/// Anything that can turn a [`TranslateRequest`] into result text.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> AppResult<TranslateResponse>;
}

/// reqwest-backed client for the HTTP translation endpoint.
pub struct HttpTranslationBackend {
    client: Client,
    endpoint: String,
}

impl HttpTranslationBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("translation-widget/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &BackendSettings) -> AppResult<Self> {
        Self::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslationBackend {
    async fn translate(&self, request: &TranslateRequest) -> AppResult<TranslateResponse> {
        debug!(
            endpoint = %self.endpoint,
            language = %request.language,
            provider = %request.provider,
            version = %request.version,
            action = %request.action,
            "sending translation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(&request.form_fields())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "translation request failed");
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<BackendErrorBody>(&body)
                .map(|b| b.error)
                .ok()
                .filter(|e| !e.is_empty());
            error!(%status, ?detail, "translation service returned error");
            return Err(AppError::Backend(match detail {
                Some(detail) => format!("Translation service returned {}: {}", status, detail),
                None => format!("Translation service returned {}", status),
            }));
        }

        response.json::<TranslateResponse>().await.map_err(|e| {
            error!(error = %e, "failed to parse translation response");
            AppError::Backend(format!("Failed to parse translation response: {}", e))
        })
    }
}
