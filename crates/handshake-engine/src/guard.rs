//! Session guard: liveness probe on suspicious transport closes.

use crate::AuthEngine;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Close event reported by the real-time sync transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportClose {
    /// Whether at least one response had arrived before the close.
    pub received_first_response: bool,
}

/// Watches transport close events for signs of a rejected session token.
///
/// A close before the first response ever arrived strongly suggests the
/// handshake was rejected because the token is invalid; a close after a
/// working session is an ordinary network drop and is ignored. Returned by
/// [`AuthEngine::init_auth`] when a session is adopted; the caller attaches
/// it to the transport's close events.
pub struct LivenessWatcher {
    engine: AuthEngine,
}

impl LivenessWatcher {
    pub(crate) fn new(engine: AuthEngine) -> Self {
        Self { engine }
    }

    /// React to a transport close event.
    ///
    /// Probes session validity only when the connection closed before any
    /// response was received. An invalid token ends in a storage wipe and a
    /// login redirect; probe transport errors are logged and swallowed, the
    /// next close will probe again.
    pub async fn on_transport_close(&self, close: TransportClose) {
        if close.received_first_response {
            return;
        }

        tracing::debug!("Transport closed before the first response, probing session validity");
        if let Err(err) = self.engine.handle_potential_invalid_jwt().await {
            tracing::warn!(error = %err, "Session validity probe did not complete");
        }
    }

    /// Drive the watcher from a stream of transport close events.
    pub fn spawn(self, mut closes: mpsc::Receiver<TransportClose>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(close) = closes.recv().await {
                self.on_transport_close(close).await;
            }
        })
    }
}
