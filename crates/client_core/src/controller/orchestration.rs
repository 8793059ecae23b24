//! Event loop feeding UI/runtime events into the submission controller.

use std::sync::Arc;

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use super::{events::ControllerEvent, SubmissionController};

pub const EVENT_QUEUE_CAPACITY: usize = 64;

pub fn event_channel() -> (mpsc::Sender<ControllerEvent>, mpsc::Receiver<ControllerEvent>) {
    mpsc::channel(EVENT_QUEUE_CAPACITY)
}

/// Queues an event without blocking the caller. Returns `false` when the event was dropped.
pub fn dispatch_event(tx: &mpsc::Sender<ControllerEvent>, event: ControllerEvent) -> bool {
    let name = event.name();
    match tx.try_send(event) {
        Ok(()) => {
            tracing::debug!(event = name, "queued controller event");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = name, "controller event queue is full; dropping event");
            false
        }
        Err(TrySendError::Closed(_)) => {
            tracing::warn!(event = name, "controller event loop has stopped; dropping event");
            false
        }
    }
}

/// Drains `rx` until every sender is dropped.
///
/// Submissions run on their own task so later events (a second trigger, a connectivity
/// change) are handled while the transport call is pending. In-flight submissions are
/// awaited before returning.
pub async fn run_event_loop(
    controller: Arc<SubmissionController>,
    mut rx: mpsc::Receiver<ControllerEvent>,
) {
    let mut submissions: Vec<JoinHandle<()>> = Vec::new();

    while let Some(event) = rx.recv().await {
        match event {
            ControllerEvent::SubmitTriggered => {
                let controller = Arc::clone(&controller);
                submissions.push(tokio::spawn(async move {
                    controller.submit().await;
                }));
                submissions.retain(|handle| !handle.is_finished());
            }
            other => controller.handle_event(other).await,
        }
    }

    for handle in submissions {
        if let Err(err) = handle.await {
            tracing::error!(error = %err, "submission task aborted");
        }
    }
}
