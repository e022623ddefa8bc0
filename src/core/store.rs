use std::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::shared::types::{FormSnapshot, FormState, NotificationState, RequestOutcome};

/// All mutable state of one form, owned by the controller.
#[derive(Debug, Default)]
pub struct FormStore {
    pub form: FormState,
    pub validation_error: Option<String>,
    pub outcome: RequestOutcome,
    pub notification: NotificationState,
    /// Sequence number of the newest request. Responses tagged otherwise are stale.
    pub latest_seq: u64,
}

impl FormStore {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            form: self.form.clone(),
            validation_error: self.validation_error.clone(),
            outcome: self.outcome.clone(),
            notification: self.notification.clone(),
        }
    }

    /// Start a new request, discarding the previous result.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_seq += 1;
        self.outcome = RequestOutcome::Pending { seq: self.latest_seq };
        self.latest_seq
    }

    /// Drop whatever is in flight; its response will be treated as stale.
    pub fn invalidate_requests(&mut self) {
        self.latest_seq += 1;
    }

    /// Apply the result of request `seq`. Returns false if it was superseded.
    pub fn complete_request(&mut self, seq: u64, outcome: RequestOutcome) -> bool {
        if seq != self.latest_seq || self.outcome != (RequestOutcome::Pending { seq }) {
            return false;
        }
        self.outcome = outcome;
        true
    }
}

/// Lock the store, recovering from a poisoned mutex.
pub fn lock_store(store: &Mutex<FormStore>) -> MutexGuard<'_, FormStore> {
    match store.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("form store mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut store = FormStore::default();
        let first = store.begin_request();
        let second = store.begin_request();

        assert!(!store.complete_request(first, RequestOutcome::Succeeded("old".into())));
        assert_eq!(store.outcome, RequestOutcome::Pending { seq: second });

        assert!(store.complete_request(second, RequestOutcome::Succeeded("new".into())));
        assert_eq!(store.outcome, RequestOutcome::Succeeded("new".into()));
    }

    #[test]
    fn test_invalidated_request_is_stale() {
        let mut store = FormStore::default();
        let seq = store.begin_request();
        store.invalidate_requests();
        store.outcome = RequestOutcome::Idle;

        assert!(!store.complete_request(seq, RequestOutcome::Succeeded("late".into())));
        assert_eq!(store.outcome, RequestOutcome::Idle);
    }

    #[test]
    fn test_request_completes_once() {
        let mut store = FormStore::default();
        let seq = store.begin_request();
        assert!(store.complete_request(seq, RequestOutcome::Failed("boom".into())));
        assert!(!store.complete_request(seq, RequestOutcome::Succeeded("again".into())));
        assert_eq!(store.outcome, RequestOutcome::Failed("boom".into()));
    }
}
