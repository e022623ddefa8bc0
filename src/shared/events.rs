use serde::Serialize;

use crate::shared::types::{FormState, NotificationState, RequestOutcome};

/// State changes published to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum AppEvent {
    FormUpdated(FormState),
    ValidationFailed(String),
    OutcomeChanged(RequestOutcome),
    NotificationChanged(NotificationState),
}

impl AppEvent {
    /// Channel name the event is published under.
    pub fn channel(&self) -> &'static str {
        match self {
            AppEvent::FormUpdated(_) => "form://updated",
            AppEvent::ValidationFailed(_) => "form://validation",
            AppEvent::OutcomeChanged(_) => "request://outcome",
            AppEvent::NotificationChanged(_) => "notification://changed",
        }
    }
}
