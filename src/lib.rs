pub mod api;
pub mod core;
pub mod shared;

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::controller::TranslationFormController;
use crate::shared::emit::BroadcastSink;
use crate::shared::error::AppResult;
use crate::shared::settings::AppSettings;

const EVENT_CAPACITY: usize = 64;

/// Load settings, start logging and run the interactive form. Returns the exit code.
pub fn run() -> AppResult<i32> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> AppResult<i32> {
    let (settings, load_error) = match AppSettings::load().await {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e)),
    };
    let settings = settings.apply_env_overrides();

    shared::logging::init_logging(&settings.log_level)?;
    if let Some(e) = load_error {
        warn!(error = %e, "failed to load settings, using defaults");
    }

    let sink = BroadcastSink::new(EVENT_CAPACITY);
    let events = sink.subscribe();
    let controller = TranslationFormController::from_settings(&settings, Arc::new(sink))?;
    info!("translation form ready");

    api::repl::run_repl(&controller, events).await
}
