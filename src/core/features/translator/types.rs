use serde::Deserialize;

use crate::shared::types::{Action, FormState, Language, Provider};

/// Body of the form-encoded POST sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub message: String,
    pub language: Language,
    pub provider: Provider,
    pub version: String,
    pub action: Action,
}

impl From<&FormState> for TranslateRequest {
    fn from(form: &FormState) -> Self {
        Self {
            message: form.message.clone(),
            language: form.target_language,
            provider: form.provider,
            version: form.model_version.clone(),
            action: form.action,
        }
    }
}

impl TranslateRequest {
    /// Key/value pairs in wire order.
    pub fn form_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("message", self.message.as_str()),
            ("language", self.language.name()),
            ("model", self.provider.name()),
            ("version", self.version.as_str()),
            ("action", self.action.as_str()),
        ]
    }
}

/// Backend reply. Older deployments name the field `translatedText`, newer ones `result`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "result", alias = "translatedText")]
    pub text: String,
}

/// Error body some backends return alongside a non-success status.
#[derive(Debug, Deserialize)]
pub(crate) struct BackendErrorBody {
    pub error: String,
}
