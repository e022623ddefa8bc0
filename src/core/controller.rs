//! Translation form controller
//!
//! Owns the [`FormStore`] and is the only place it is mutated. Every public
//! method is one user action: edit a field, submit, copy, clear.

use std::sync::{Arc, Mutex, Weak};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::clipboard::{ClipboardWriter, SystemClipboard};
use super::features::translator::types::TranslateRequest;
use super::features::translator::{HttpTranslationBackend, TranslationBackend};
use super::form;
use super::notification;
use super::store::{lock_store, FormStore};
use crate::shared::emit::{emit_event, EventSink};
use crate::shared::error::{AppError, AppResult};
use crate::shared::errors::ERR_REQUEST_CANCELLED;
use crate::shared::events::AppEvent;
use crate::shared::settings::AppSettings;
use crate::shared::types::{
    Action, FormEdit, FormSnapshot, FormState, Language, Provider, RequestOutcome,
};

pub struct TranslationFormController {
    store: Arc<Mutex<FormStore>>,
    backend: Arc<dyn TranslationBackend>,
    clipboard: Arc<dyn ClipboardWriter>,
    sink: Arc<dyn EventSink>,
}

impl TranslationFormController {
    pub fn new(
        form: FormState,
        backend: Arc<dyn TranslationBackend>,
        clipboard: Arc<dyn ClipboardWriter>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(FormStore::new(form))),
            backend,
            clipboard,
            sink,
        }
    }

    /// HTTP backend, system clipboard and the user's default selections.
    pub fn from_settings(settings: &AppSettings, sink: Arc<dyn EventSink>) -> AppResult<Self> {
        let backend = HttpTranslationBackend::from_settings(&settings.backend)?;
        info!(endpoint = %backend.endpoint(), "translation backend configured");

        let prefs = &settings.preferences;
        let form = FormState::with_selection(
            prefs.default_language,
            prefs.default_provider,
            prefs.default_action,
        );
        Ok(Self::new(form, Arc::new(backend), Arc::new(SystemClipboard), sink))
    }

    pub fn snapshot(&self) -> FormSnapshot {
        lock_store(&self.store).snapshot()
    }

    /// Replace one field and clear any validation error.
    pub fn edit(&self, edit: FormEdit) -> AppResult<FormState> {
        let form = {
            let mut store = lock_store(&self.store);
            let next = form::apply_edit(&store.form, edit)?;
            store.form = next.clone();
            store.validation_error = None;
            next
        };
        emit_event(self.sink.as_ref(), AppEvent::FormUpdated(form.clone()));
        Ok(form)
    }

    pub fn set_message(&self, message: impl Into<String>) -> AppResult<FormState> {
        self.edit(FormEdit::Message(message.into()))
    }

    pub fn select_language(&self, language: Language) -> AppResult<FormState> {
        self.edit(FormEdit::Language(language))
    }

    pub fn select_provider(&self, provider: Provider) -> AppResult<FormState> {
        self.edit(FormEdit::Provider(provider))
    }

    pub fn select_model_version(&self, version: impl Into<String>) -> AppResult<FormState> {
        self.edit(FormEdit::ModelVersion(version.into()))
    }

    pub fn select_action(&self, action: Action) -> AppResult<FormState> {
        self.edit(FormEdit::Action(action))
    }

    /// Validate and send the form.
    ///
    /// An empty message sets the inline error and returns
    /// `AppError::Validation` without touching the network. Otherwise the
    /// returned outcome is this request's; it is only written to the store if
    /// no newer submission or clear happened while it was in flight.
    pub async fn submit(&self) -> AppResult<RequestOutcome> {
        let (seq, request) = {
            let mut store = lock_store(&self.store);
            if let Err(msg) = form::validate_submission(&store.form) {
                store.validation_error = Some(msg.to_string());
                drop(store);
                debug!("submit rejected: {}", msg);
                emit_event(self.sink.as_ref(), AppEvent::ValidationFailed(msg.to_string()));
                return Err(AppError::Validation(msg.to_string()));
            }
            let seq = store.begin_request();
            (seq, TranslateRequest::from(&store.form))
        };

        info!(seq, language = %request.language, provider = %request.provider, action = %request.action, "submitting");
        emit_event(self.sink.as_ref(), AppEvent::OutcomeChanged(RequestOutcome::Pending { seq }));

        let guard = PendingGuard::new(Arc::downgrade(&self.store), seq, self.sink.clone());
        let result = self.backend.translate(&request).await;
        guard.disarm();

        let outcome = match result {
            Ok(response) => RequestOutcome::Succeeded(response.text),
            Err(e) => {
                error!(seq, error = %e, "translation failed");
                RequestOutcome::Failed(e.to_string())
            }
        };

        let applied = lock_store(&self.store).complete_request(seq, outcome.clone());
        if applied {
            emit_event(self.sink.as_ref(), AppEvent::OutcomeChanged(outcome.clone()));
        } else {
            warn!(seq, "discarding response from superseded request");
        }
        Ok(outcome)
    }

    /// Copy the current result to the clipboard.
    ///
    /// Returns `Ok(false)` when there is nothing to copy. A clipboard failure
    /// is logged and returned; state is left unchanged.
    pub async fn copy_result(&self) -> AppResult<bool> {
        let text = lock_store(&self.store)
            .outcome
            .result_text()
            .map(str::to_owned);
        let Some(text) = text else {
            debug!("nothing to copy");
            return Ok(false);
        };

        let clipboard = Arc::clone(&self.clipboard);
        let written = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .map_err(|e| AppError::Clipboard(format!("Clipboard task failed: {}", e)))
            .and_then(|r| r);
        if let Err(e) = written {
            error!(error = %e, "failed to copy");
            return Err(e);
        }

        let state = {
            let mut store = lock_store(&self.store);
            store.notification = store.notification.show(Utc::now());
            store.notification.clone()
        };
        debug!(cycle = state.cycle, "copied result to clipboard");
        emit_event(self.sink.as_ref(), AppEvent::NotificationChanged(state.clone()));
        notification::spawn_dismissal(Arc::downgrade(&self.store), state.cycle, self.sink.clone());
        Ok(true)
    }

    /// Empty the message and the result, keep every selection.
    pub fn clear(&self) {
        let form = {
            let mut store = lock_store(&self.store);
            store.form = form::cleared(&store.form);
            store.validation_error = None;
            store.outcome = RequestOutcome::Idle;
            store.invalidate_requests();
            store.form.clone()
        };
        emit_event(self.sink.as_ref(), AppEvent::FormUpdated(form));
        emit_event(self.sink.as_ref(), AppEvent::OutcomeChanged(RequestOutcome::Idle));
    }
}

/// Moves request `seq` out of `Pending` if its future is dropped mid-flight.
struct PendingGuard {
    store: Weak<Mutex<FormStore>>,
    seq: u64,
    sink: Arc<dyn EventSink>,
    armed: bool,
}

impl PendingGuard {
    fn new(store: Weak<Mutex<FormStore>>, seq: u64, sink: Arc<dyn EventSink>) -> Self {
        Self { store, seq, sink, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let cancelled = RequestOutcome::Failed(ERR_REQUEST_CANCELLED.to_string());
        if lock_store(&store).complete_request(self.seq, cancelled.clone()) {
            warn!(seq = self.seq, "request dropped before completion");
            emit_event(self.sink.as_ref(), AppEvent::OutcomeChanged(cancelled));
        }
    }
}
