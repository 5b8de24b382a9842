//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the device, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | relay={:?}", state);
            }
            AppEvent::CommandReceived { command, len } => {
                info!("CMD   | {:?} ({} bytes)", command, len);
            }
            AppEvent::StateChanged { from, to } => {
                info!("RELAY | {:?} -> {:?}", from, to);
            }
            AppEvent::Status(s) => {
                info!(
                    "STATUS | relay={:?} | cycles={} | commands={} | last={:?}",
                    s.state, s.cycles, s.commands, s.last_command,
                );
            }
            AppEvent::SerialFault(e) => {
                warn!("FAULT | serial: {}", e);
            }
            AppEvent::ActuationFailed(e) => {
                warn!("FAULT | relay: {}", e);
            }
        }
    }
}
