use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::AppError;

/// Target languages offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    #[default]
    Hindi,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Hindi,
        Language::Japanese,
    ];

    /// Display name, also the value sent to the backend.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Hindi => "Hindi",
            Language::Japanese => "Japanese",
        }
    }

    fn to_iso(self) -> isolang::Language {
        match self {
            Language::English => isolang::Language::Eng,
            Language::Spanish => isolang::Language::Spa,
            Language::French => isolang::Language::Fra,
            Language::Hindi => isolang::Language::Hin,
            Language::Japanese => isolang::Language::Jpn,
        }
    }

    fn from_iso(lang: isolang::Language) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.to_iso() == lang)
    }

    /// ISO 639-1 code (e.g. "es").
    pub fn iso_code(&self) -> String {
        let lang = self.to_iso();
        lang.to_639_1()
            .map(|c| c.to_string())
            .unwrap_or_else(|| lang.to_639_3().to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = AppError;

    /// Accepts a display name in any case, or an ISO 639-1 / 639-3 code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some(lang) = Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(raw))
        {
            return Ok(lang);
        }

        let code = raw.to_ascii_lowercase();
        isolang::Language::from_639_1(&code)
            .or_else(|| isolang::Language::from_639_3(&code))
            .and_then(Self::from_iso)
            .ok_or_else(|| AppError::Validation(format!("Unsupported language: {}", raw)))
    }
}

/// Translation engine selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Provider {
    #[default]
    ChatGPT,
    Gemini,
    Deepl,
}

const CHATGPT_MODELS: &[&str] = &["gpt-3.5-turbo", "gpt-4o-mini", "gpt-4o"];
const GEMINI_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro"];
const DEEPL_MODELS: &[&str] = &[
    "latency_optimized",
    "quality_optimized",
    "prefer_quality_optimized",
];

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::ChatGPT, Provider::Gemini, Provider::Deepl];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::ChatGPT => "ChatGPT",
            Provider::Gemini => "Gemini",
            Provider::Deepl => "Deepl",
        }
    }

    /// Model versions valid for this provider. The first entry is the default.
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Provider::ChatGPT => CHATGPT_MODELS,
            Provider::Gemini => GEMINI_MODELS,
            Provider::Deepl => DEEPL_MODELS,
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.models()[0]
    }

    pub fn supports_model(&self, version: &str) -> bool {
        self.models().contains(&version)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(raw))
            .ok_or_else(|| AppError::Validation(format!("Unsupported provider: {}", raw)))
    }
}

/// Text operation requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Translate,
    Synonyms,
    Grammar,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Translate, Action::Synonyms, Action::Grammar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Translate => "translate",
            Action::Synonyms => "synonyms",
            Action::Grammar => "grammar",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| AppError::Validation(format!("Unsupported action: {}", raw)))
    }
}

/// User-editable form fields.
///
/// `model_version` always belongs to `provider.models()`; the reducers in
/// `core::form` are the only code that changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub message: String,
    pub target_language: Language,
    pub provider: Provider,
    pub model_version: String,
    pub action: Action,
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_selection(Language::default(), Provider::default(), Action::default())
    }
}

impl FormState {
    pub fn with_selection(target_language: Language, provider: Provider, action: Action) -> Self {
        Self {
            message: String::new(),
            target_language,
            provider,
            model_version: provider.default_model().to_string(),
            action,
        }
    }
}

/// A single field replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    Message(String),
    Language(Language),
    Provider(Provider),
    ModelVersion(String),
    Action(Action),
}

/// Lifecycle of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RequestOutcome {
    #[default]
    Idle,
    Pending { seq: u64 },
    Succeeded(String),
    Failed(String),
}

impl RequestOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestOutcome::Pending { .. })
    }

    pub fn result_text(&self) -> Option<&str> {
        match self {
            RequestOutcome::Succeeded(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// "Copied to clipboard!" toast.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NotificationState {
    pub visible: bool,
    pub expires_at: Option<DateTime<Utc>>,
    /// Incremented once per successful copy.
    pub cycle: u64,
}

/// Everything a front end needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub form: FormState,
    pub validation_error: Option<String>,
    pub outcome: RequestOutcome,
    pub notification: NotificationState,
}

impl FormSnapshot {
    pub fn is_loading(&self) -> bool {
        self.outcome.is_loading()
    }
}
