use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::error::AppResult;
use super::events::AppEvent;

/// Destination for [`AppEvent`]s.
pub trait EventSink: Send + Sync {
    fn emit(&self, channel: &str, event: &AppEvent) -> AppResult<()>;
}

/// Emit an application event, logging instead of failing when the sink rejects it.
pub fn emit_event(sink: &dyn EventSink, event: AppEvent) {
    let channel = event.channel();
    if let Err(e) = sink.emit(channel, &event) {
        warn!(channel, error = %e, "failed to emit event");
    }
}

/// Sink that only writes events to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, channel: &str, event: &AppEvent) -> AppResult<()> {
        let payload = serde_json::to_string(event)?;
        debug!(channel, %payload, "event");
        Ok(())
    }
}

/// Fan-out sink backed by a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<AppEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, channel: &str, event: &AppEvent) -> AppResult<()> {
        // No subscribers is fine; the next snapshot carries the same state.
        if self.tx.send(event.clone()).is_err() {
            debug!(channel, "no event subscribers");
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::RequestOutcome;

    #[tokio::test]
    async fn test_broadcast_sink_delivers_to_subscribers() {
        let sink = BroadcastSink::new(8);
        let mut rx = sink.subscribe();

        emit_event(&sink, AppEvent::OutcomeChanged(RequestOutcome::Idle));

        let received = rx.recv().await.unwrap();
        assert_eq!(received, AppEvent::OutcomeChanged(RequestOutcome::Idle));
    }

    #[test]
    fn test_broadcast_sink_without_subscribers_is_ok() {
        let sink = BroadcastSink::new(8);
        assert!(sink
            .emit("request://outcome", &AppEvent::OutcomeChanged(RequestOutcome::Idle))
            .is_ok());
    }
}
