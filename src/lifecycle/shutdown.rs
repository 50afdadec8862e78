//! Stop coordination for the firewall listener.

use tokio::sync::broadcast;

use crate::lifecycle::signals;

/// Owner side of the stop signal.
///
/// Dropping it also stops every subscribed server, so embedders must keep it
/// alive for as long as the firewall should run.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A signal for one server to await before it stops accepting.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Tell every subscribed server to stop. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves when the owning [`Shutdown`] fires or is dropped, or when the
/// process gets Ctrl+C or SIGTERM.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
}

impl ShutdownSignal {
    pub async fn recv(mut self) {
        tokio::select! {
            _ = self.rx.recv() => tracing::info!("Shutdown requested"),
            _ = signals::wait_for_signal() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_every_server() {
        let shutdown = Shutdown::new();
        let first = shutdown.subscribe();
        let second = shutdown.subscribe();

        assert_eq!(shutdown.trigger(), 2);

        tokio::time::timeout(Duration::from_secs(1), async {
            first.recv().await;
            second.recv().await;
        })
        .await
        .expect("signals did not resolve");
    }

    #[tokio::test]
    async fn test_dropping_owner_releases_signal() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        drop(shutdown);

        assert!(tokio::time::timeout(Duration::from_secs(1), signal.recv())
            .await
            .is_ok());
    }

    #[test]
    fn test_trigger_without_servers() {
        assert_eq!(Shutdown::default().trigger(), 0);
    }
}
