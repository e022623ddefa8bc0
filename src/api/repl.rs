//! Interactive shell for the translation form.
//!
//! Reads one command per line, prints the rendered form after each one, and
//! reports notification expiry as it happens in the background.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::broadcast;
use tracing::debug;

use super::commands::{execute_command, CommandReply, FormCommand};
use crate::core::controller::TranslationFormController;
use crate::shared::error::AppResult;
use crate::shared::events::AppEvent;

/// Run the shell until `exit`, Ctrl-D, or a terminal error. Returns the exit code.
pub async fn run_repl(
    controller: &TranslationFormController,
    events: broadcast::Receiver<AppEvent>,
) -> AppResult<i32> {
    let printer = tokio::spawn(print_background_events(events));

    println!("Translation form. Type 'help' for available commands, 'exit' to quit");
    println!("{}", super::commands::render_snapshot(&controller.snapshot()));
    println!();

    let mut rl = DefaultEditor::new()?;
    let code = loop {
        match rl.readline("translate> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let command = match line.parse::<FormCommand>() {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        continue;
                    }
                };

                match execute_command(controller, command).await {
                    Ok(CommandReply::Print(text)) => println!("{}\n", text),
                    Ok(CommandReply::Exit) => break 0,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break 0;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break 1;
            }
        }
    };

    printer.abort();
    Ok(code)
}

async fn print_background_events(mut events: broadcast::Receiver<AppEvent>) {
    loop {
        match events.recv().await {
            Ok(AppEvent::NotificationChanged(state)) if !state.visible => {
                println!("(notification dismissed)");
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
