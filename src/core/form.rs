//! Pure transition functions over [`FormState`].
//!
//! Every function takes the previous state by reference and returns a new one;
//! nothing here touches the network or the store.

use crate::shared::error::{AppError, AppResult};
use crate::shared::errors::ERR_EMPTY_MESSAGE;
use crate::shared::types::{FormEdit, FormState};

/// Replace one field.
///
/// Selecting a provider resets the model version to that provider's default.
/// A model version outside the current provider's catalog is rejected.
pub fn apply_edit(state: &FormState, edit: FormEdit) -> AppResult<FormState> {
    let mut next = state.clone();
    match edit {
        FormEdit::Message(message) => next.message = message,
        FormEdit::Language(language) => next.target_language = language,
        FormEdit::Provider(provider) => {
            next.provider = provider;
            next.model_version = provider.default_model().to_string();
        }
        FormEdit::ModelVersion(version) => {
            if !state.provider.supports_model(&version) {
                return Err(AppError::Validation(format!(
                    "Model '{}' is not available for {} (expected one of: {})",
                    version,
                    state.provider,
                    state.provider.models().join(", ")
                )));
            }
            next.model_version = version;
        }
        FormEdit::Action(action) => next.action = action,
    }
    Ok(next)
}

/// Check the form before dispatch. Returns the inline error text on failure.
pub fn validate_submission(state: &FormState) -> Result<(), &'static str> {
    if state.message.is_empty() {
        return Err(ERR_EMPTY_MESSAGE);
    }
    Ok(())
}

/// Empty the message, keep every selection.
pub fn cleared(state: &FormState) -> FormState {
    FormState {
        message: String::new(),
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{Action, Language, Provider};

    #[test]
    fn test_edit_replaces_single_field() {
        let state = FormState::default();
        let next = apply_edit(&state, FormEdit::Message("Hello".into())).unwrap();

        assert_eq!(next.message, "Hello");
        assert_eq!(next.target_language, state.target_language);
        assert_eq!(next.provider, state.provider);
        assert_eq!(next.model_version, state.model_version);
        // previous state untouched
        assert!(state.message.is_empty());
    }

    #[test]
    fn test_provider_change_resets_model_version() {
        let mut state = FormState::default();
        state = apply_edit(&state, FormEdit::ModelVersion("gpt-4o".into())).unwrap();

        for provider in Provider::ALL {
            let next = apply_edit(&state, FormEdit::Provider(provider)).unwrap();
            assert_eq!(next.model_version, provider.default_model());
            assert!(next.provider.supports_model(&next.model_version));
        }
    }

    #[test]
    fn test_reselecting_same_provider_still_resets() {
        let state = apply_edit(&FormState::default(), FormEdit::ModelVersion("gpt-4o".into())).unwrap();
        let next = apply_edit(&state, FormEdit::Provider(Provider::ChatGPT)).unwrap();
        assert_eq!(next.model_version, "gpt-3.5-turbo");
    }

    #[test]
    fn test_foreign_model_version_rejected() {
        let state = FormState::default();
        let err = apply_edit(&state, FormEdit::ModelVersion("gemini-1.5-pro".into())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_empty_message() {
        let state = FormState::default();
        assert_eq!(validate_submission(&state), Err("Please enter the message."));

        let state = apply_edit(&state, FormEdit::Message("Hello".into())).unwrap();
        assert_eq!(validate_submission(&state), Ok(()));
    }

    #[test]
    fn test_whitespace_message_is_submittable() {
        let state = apply_edit(&FormState::default(), FormEdit::Message(" ".into())).unwrap();
        assert!(validate_submission(&state).is_ok());
    }

    #[test]
    fn test_cleared_keeps_selections() {
        let state = FormState {
            message: "Hello".into(),
            target_language: Language::Spanish,
            provider: Provider::Gemini,
            model_version: "gemini-1.5-pro".into(),
            action: Action::Synonyms,
        };
        let next = cleared(&state);

        assert!(next.message.is_empty());
        assert_eq!(next.target_language, Language::Spanish);
        assert_eq!(next.provider, Provider::Gemini);
        assert_eq!(next.model_version, "gemini-1.5-pro");
        assert_eq!(next.action, Action::Synonyms);
    }
}
