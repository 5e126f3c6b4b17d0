use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Periodic "time to study" notice running alongside the interactive session.
///
/// Each firing re-arms the timer for a full interval, so a slow consumer
/// never causes a burst of catch-up reminders. While inactive the timer keeps
/// running but nothing is sent.
pub struct Reminder {
    active: Arc<AtomicBool>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Reminder {
    /// Start the reminder task. Notices are delivered on `notices`.
    pub fn spawn(
        interval: Duration,
        message: String,
        active: bool,
        notices: mpsc::UnboundedSender<String>,
    ) -> Self {
        let active = Arc::new(AtomicBool::new(active));
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run(
            interval,
            message,
            Arc::clone(&active),
            cancel.clone(),
            notices,
        ));

        Self {
            active,
            cancel,
            handle,
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
        debug!(active, "Reminder toggled");
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Stop the timer and wait for the task to finish.
    ///
    /// No notice is sent once this returns.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warn!("Reminder task ended abnormally: {}", e);
        }
    }
}

async fn run(
    interval: Duration,
    message: String,
    active: Arc<AtomicBool>,
    cancel: CancellationToken,
    notices: mpsc::UnboundedSender<String>,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }

        if cancel.is_cancelled() {
            break;
        }

        if active.load(Ordering::Relaxed) {
            debug!("Reminder fired");
            if notices.send(message.clone()).is_err() {
                break;
            }
        }
    }
    debug!("Reminder stopped");
}
