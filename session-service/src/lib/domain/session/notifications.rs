use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::session::models::LoginNotice;
use crate::domain::session::ports::LoginNotifier;

/// Handle for queueing login notices to a background worker.
///
/// Queueing never waits: when the queue is full or the worker is gone the
/// notice is dropped and logged. Delivery failures are logged by the worker
/// and never retried.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<LoginNotice>,
}

impl NotificationDispatcher {
    /// Start the delivery worker.
    ///
    /// # Arguments
    /// * `notifier` - Transport used for each notice
    /// * `capacity` - Maximum number of queued notices
    /// * `shutdown` - Stops the worker when cancelled
    ///
    /// # Returns
    /// The dispatcher handle and the worker's join handle. The worker also
    /// stops once every handle is dropped and the queue is drained.
    pub fn spawn<N>(
        notifier: Arc<N>,
        capacity: usize,
        shutdown: CancellationToken,
    ) -> (Self, JoinHandle<()>)
    where
        N: LoginNotifier + ?Sized,
    {
        let (sender, receiver) = mpsc::channel(capacity);
        let worker = tokio::spawn(run_worker(notifier, receiver, shutdown));

        (Self { sender }, worker)
    }

    /// Queue a notice for delivery.
    pub fn dispatch(&self, notice: LoginNotice) {
        match self.sender.try_send(notice) {
            Ok(()) => {}
            Err(TrySendError::Full(notice)) => {
                tracing::warn!(
                    recipient = %notice.email,
                    "Login notice queue is full, dropping notice"
                );
            }
            Err(TrySendError::Closed(notice)) => {
                tracing::warn!(
                    recipient = %notice.email,
                    "Login notice worker has stopped, dropping notice"
                );
            }
        }
    }
}

async fn run_worker<N>(
    notifier: Arc<N>,
    mut receiver: mpsc::Receiver<LoginNotice>,
    shutdown: CancellationToken,
) where
    N: LoginNotifier + ?Sized,
{
    tracing::info!("Login notice worker started");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!(pending = receiver.len(), "Login notice worker cancelled");
                break;
            }
            notice = receiver.recv() => {
                let Some(notice) = notice else {
                    break;
                };

                match notifier.send_login_notice(&notice).await {
                    Ok(()) => tracing::debug!(
                        recipient = %notice.email,
                        "Login notice delivered"
                    ),
                    Err(e) => tracing::error!(
                        recipient = %notice.email,
                        error = %e,
                        "Failed to deliver login notice"
                    ),
                }
            }
        }
    }

    tracing::info!("Login notice worker stopped");
}
