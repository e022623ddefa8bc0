//! Command modules for the interactive shell
//!
//! Parses one input line into a [`FormCommand`], runs it against the
//! controller and renders the resulting snapshot.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::core::controller::TranslationFormController;
use crate::shared::error::{AppError, AppResult};
use crate::shared::errors::MSG_COPIED;
use crate::shared::types::{Action, FormEdit, FormSnapshot, Language, Provider, RequestOutcome};

pub const HELP: &str = "\
Commands:
  msg <text>          set the message
  lang <language>     English, Spanish, French, Hindi, Japanese (or ISO code)
  provider <name>     ChatGPT, Gemini, Deepl
  version <id>        model version for the current provider
  action <name>       translate, synonyms, grammar
  submit | translate  send the form
  copy                copy the result to the clipboard
  clear               clear message and result
  show                print the form
  models              list model versions per provider
  help                this text
  exit | quit         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Edit(FormEdit),
    Submit,
    Copy,
    Clear,
    Show,
    Models,
    Help,
    Exit,
}

impl FromStr for FormCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            // The message may legitimately be empty; submit validates it.
            "msg" | "message" => Ok(FormCommand::Edit(FormEdit::Message(rest.to_string()))),
            "lang" | "language" => Ok(FormCommand::Edit(FormEdit::Language(
                Language::from_str(require_arg(rest, "lang")?)?,
            ))),
            "provider" => Ok(FormCommand::Edit(FormEdit::Provider(
                Provider::from_str(require_arg(rest, "provider")?)?,
            ))),
            "version" | "model" => Ok(FormCommand::Edit(FormEdit::ModelVersion(
                require_arg(rest, "version")?.to_string(),
            ))),
            "action" => Ok(FormCommand::Edit(FormEdit::Action(
                Action::from_str(require_arg(rest, "action")?)?,
            ))),
            "submit" | "translate" => Ok(FormCommand::Submit),
            "copy" => Ok(FormCommand::Copy),
            "clear" => Ok(FormCommand::Clear),
            "show" | "status" => Ok(FormCommand::Show),
            "models" => Ok(FormCommand::Models),
            "help" | "?" => Ok(FormCommand::Help),
            "exit" | "quit" => Ok(FormCommand::Exit),
            other => Err(AppError::Validation(format!(
                "Unknown command: {} (type 'help')",
                other
            ))),
        }
    }
}

fn require_arg<'a>(rest: &'a str, name: &str) -> AppResult<&'a str> {
    if rest.is_empty() {
        Err(AppError::Validation(format!("'{}' needs an argument", name)))
    } else {
        Ok(rest)
    }
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    Print(String),
    Exit,
}

/// Execute one parsed command.
pub async fn execute_command(
    controller: &TranslationFormController,
    command: FormCommand,
) -> AppResult<CommandReply> {
    match command {
        FormCommand::Edit(edit) => {
            controller.edit(edit)?;
            Ok(CommandReply::Print(render_snapshot(&controller.snapshot())))
        }
        FormCommand::Submit => {
            // Validation and backend failures both end up in the snapshot.
            match controller.submit().await {
                Ok(_) | Err(AppError::Validation(_)) => {}
                Err(e) => return Err(e),
            }
            Ok(CommandReply::Print(render_snapshot(&controller.snapshot())))
        }
        FormCommand::Copy => {
            if controller.copy_result().await? {
                Ok(CommandReply::Print(MSG_COPIED.to_string()))
            } else {
                Ok(CommandReply::Print("Nothing to copy.".to_string()))
            }
        }
        FormCommand::Clear => {
            controller.clear();
            Ok(CommandReply::Print(render_snapshot(&controller.snapshot())))
        }
        FormCommand::Show => Ok(CommandReply::Print(render_snapshot(&controller.snapshot()))),
        FormCommand::Models => Ok(CommandReply::Print(render_models())),
        FormCommand::Help => Ok(CommandReply::Print(HELP.to_string())),
        FormCommand::Exit => Ok(CommandReply::Exit),
    }
}

pub fn render_snapshot(snapshot: &FormSnapshot) -> String {
    let form = &snapshot.form;
    let mut out = String::new();
    let _ = writeln!(out, "Message:  {}", form.message);
    let _ = writeln!(
        out,
        "Language: {} ({})  Provider: {} ({})  Action: {}",
        form.target_language,
        form.target_language.iso_code(),
        form.provider,
        form.model_version,
        form.action
    );
    if let Some(err) = &snapshot.validation_error {
        let _ = writeln!(out, "Error:    {}", err);
    }
    let result_line = match &snapshot.outcome {
        RequestOutcome::Idle => String::new(),
        RequestOutcome::Pending { .. } => "Translating...".to_string(),
        RequestOutcome::Succeeded(text) => text.clone(),
        RequestOutcome::Failed(msg) => format!("Failed: {}", msg),
    };
    let _ = write!(out, "Result:   {}", result_line);
    out
}

pub fn render_models() -> String {
    Provider::ALL
        .iter()
        .map(|p| format!("{}: {}", p, p.models().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::testing::MemoryClipboard;
    use crate::core::features::translator::types::{TranslateRequest, TranslateResponse};
    use crate::core::features::translator::TranslationBackend;
    use crate::shared::emit::LogSink;
    use crate::shared::types::FormState;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoBackend;

    #[async_trait]
    impl TranslationBackend for EchoBackend {
        async fn translate(&self, request: &TranslateRequest) -> AppResult<TranslateResponse> {
            Ok(TranslateResponse {
                text: format!("[{}] {}", request.language, request.message),
            })
        }
    }

    fn controller() -> TranslationFormController {
        TranslationFormController::new(
            FormState::default(),
            Arc::new(EchoBackend),
            Arc::new(MemoryClipboard::default()),
            Arc::new(LogSink),
        )
    }

    #[test]
    fn test_parse_edits() {
        assert_eq!(
            "msg Hello world".parse::<FormCommand>().unwrap(),
            FormCommand::Edit(FormEdit::Message("Hello world".into()))
        );
        assert_eq!(
            "msg".parse::<FormCommand>().unwrap(),
            FormCommand::Edit(FormEdit::Message(String::new()))
        );
        assert_eq!(
            "LANG es".parse::<FormCommand>().unwrap(),
            FormCommand::Edit(FormEdit::Language(Language::Spanish))
        );
        assert_eq!(
            "provider gemini".parse::<FormCommand>().unwrap(),
            FormCommand::Edit(FormEdit::Provider(Provider::Gemini))
        );
        assert_eq!(
            "version gpt-4o".parse::<FormCommand>().unwrap(),
            FormCommand::Edit(FormEdit::ModelVersion("gpt-4o".into()))
        );
        assert_eq!(
            "action grammar".parse::<FormCommand>().unwrap(),
            FormCommand::Edit(FormEdit::Action(Action::Grammar))
        );
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("translate".parse::<FormCommand>().unwrap(), FormCommand::Submit);
        assert_eq!("  copy ".parse::<FormCommand>().unwrap(), FormCommand::Copy);
        assert_eq!("quit".parse::<FormCommand>().unwrap(), FormCommand::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("lang".parse::<FormCommand>().is_err());
        assert!("lang Klingon".parse::<FormCommand>().is_err());
        assert!("provider Bing".parse::<FormCommand>().is_err());
        assert!("dance".parse::<FormCommand>().is_err());
    }

    #[test]
    fn test_render_snapshot() {
        let snapshot = FormSnapshot {
            form: FormState {
                message: "Hello".into(),
                ..FormState::default()
            },
            validation_error: None,
            outcome: RequestOutcome::Succeeded("Namaste".into()),
            notification: Default::default(),
        };
        let text = render_snapshot(&snapshot);
        assert!(text.contains("Message:  Hello"));
        assert!(text.contains("Language: Hindi (hi)  Provider: ChatGPT (gpt-3.5-turbo)  Action: translate"));
        assert!(text.ends_with("Result:   Namaste"));
    }

    #[test]
    fn test_render_pending_and_error() {
        let mut snapshot = FormSnapshot {
            form: FormState::default(),
            validation_error: Some("Please enter the message.".into()),
            outcome: RequestOutcome::Pending { seq: 1 },
            notification: Default::default(),
        };
        let text = render_snapshot(&snapshot);
        assert!(text.contains("Error:    Please enter the message."));
        assert!(text.contains("Translating..."));

        snapshot.outcome = RequestOutcome::Failed("Network Error: refused".into());
        assert!(render_snapshot(&snapshot).contains("Failed: Network Error: refused"));
    }

    #[tokio::test]
    async fn test_execute_session() {
        let controller = controller();

        let reply = execute_command(&controller, FormCommand::Submit).await.unwrap();
        assert!(matches!(reply, CommandReply::Print(ref text) if text.contains("Please enter the message.")));

        execute_command(&controller, "msg Hello".parse().unwrap()).await.unwrap();
        execute_command(&controller, "lang Spanish".parse().unwrap()).await.unwrap();
        let reply = execute_command(&controller, FormCommand::Submit).await.unwrap();
        assert!(matches!(reply, CommandReply::Print(ref text) if text.ends_with("Result:   [Spanish] Hello")));

        let reply = execute_command(&controller, FormCommand::Exit).await.unwrap();
        assert_eq!(reply, CommandReply::Exit);
    }

    #[tokio::test]
    async fn test_execute_rejects_foreign_version() {
        let controller = controller();
        execute_command(&controller, "provider Deepl".parse().unwrap()).await.unwrap();
        let err = execute_command(&controller, "version gpt-4o".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
