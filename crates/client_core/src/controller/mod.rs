//! Controller layer: input events, reducer-like state transitions, and the event loop
//! that feeds them.

pub mod events;
pub mod orchestration;
pub mod reducer;

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{AttemptId, FormField, RegistrationPayload},
    error::OFFLINE_MESSAGE,
    protocol::AttemptResult,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::ApiConfig,
    transport::{HttpTransport, RegistrationTransport},
    ui::{ErrorScope, RegistrationUi},
};

use events::{Connectivity, ControllerEvent};
use reducer::{reduce, SubmissionInput, SubmissionState};

pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_millis(2000);
pub const ERROR_DISPLAY_DELAY: Duration = Duration::from_millis(5000);

/// Who put the message currently shown in the general error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneralErrorOwner {
    Attempt(AttemptId),
    Connectivity,
}

struct ControllerState {
    submission: SubmissionState,
    attempt: AttemptId,
    general_error: Option<GeneralErrorOwner>,
    navigated_for: Option<AttemptId>,
    connectivity: Connectivity,
}

pub struct SubmissionController {
    transport: Arc<dyn RegistrationTransport>,
    ui: Arc<dyn RegistrationUi>,
    request_timeout: Duration,
    inner: Mutex<ControllerState>,
}

impl SubmissionController {
    pub fn new(
        transport: Arc<dyn RegistrationTransport>,
        ui: Arc<dyn RegistrationUi>,
        request_timeout: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport,
            ui,
            request_timeout,
            inner: Mutex::new(ControllerState {
                submission: SubmissionState::Idle,
                attempt: AttemptId(0),
                general_error: None,
                navigated_for: None,
                connectivity: Connectivity::Online,
            }),
        })
    }

    pub fn from_config(config: &ApiConfig, ui: Arc<dyn RegistrationUi>) -> Arc<Self> {
        Self::new(
            Arc::new(HttpTransport::new(config.base_url.clone())),
            ui,
            config.timeout,
        )
    }

    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.submission
    }

    /// Most recently started attempt; `AttemptId(0)` before the first one.
    pub async fn current_attempt(&self) -> AttemptId {
        self.inner.lock().await.attempt
    }

    pub async fn handle_event(self: &Arc<Self>, event: ControllerEvent) {
        debug!(event = event.name(), "controller event");
        match event {
            ControllerEvent::SubmitTriggered => {
                self.submit().await;
            }
            ControllerEvent::ConnectivityChanged(connectivity) => {
                self.on_connectivity_changed(connectivity).await;
            }
            ControllerEvent::FieldBlurred(field) => self.on_field_blurred(field),
            ControllerEvent::FieldEdited(field) => self.on_field_edited(field),
        }
    }

    /// Runs one attempt end to end and returns the state it settled in.
    ///
    /// A trigger that arrives while an attempt is in flight is dropped. Validation
    /// failures never reach the transport.
    pub async fn submit(self: &Arc<Self>) -> SubmissionState {
        let (attempt, payload) = {
            let mut guard = self.inner.lock().await;
            if !guard.submission.accepts_trigger() {
                debug!(
                    attempt = guard.attempt.0,
                    "registration already in flight; ignoring trigger"
                );
                return guard.submission;
            }

            if !self.ui.is_valid_form() {
                let invalid: Vec<FormField> = FormField::ALL
                    .into_iter()
                    .filter(|field| !self.ui.is_field_valid(*field))
                    .collect();
                for field in &invalid {
                    self.ui.show_error(ErrorScope::Field(*field), field.required_message());
                }
                debug!(fields = ?invalid, "registration form failed validation");
                return guard.submission;
            }

            self.ui.set_submit_enabled(false);
            self.ui.set_submitting_label(true);

            let payload = match RegistrationPayload::from_form(&self.ui.read_form_fields()) {
                Ok(payload) => payload,
                Err(err) => {
                    debug!(field = %err.field, "registration payload rejected");
                    self.ui.show_error(ErrorScope::Field(err.field), &err.message);
                    self.release_trigger();
                    return guard.submission;
                }
            };

            guard.attempt = guard.attempt.next();
            guard.submission = reduce(guard.submission, SubmissionInput::Begin);
            (guard.attempt, payload)
        };

        info!(attempt = attempt.0, "submitting registration");
        let result = self.transport.submit(&payload, self.request_timeout).await;
        drop(payload);

        self.resolve(attempt, result).await
    }

    async fn resolve(
        self: &Arc<Self>,
        attempt: AttemptId,
        result: AttemptResult,
    ) -> SubmissionState {
        let mut guard = self.inner.lock().await;
        guard.submission = reduce(guard.submission, SubmissionInput::Resolved(&result));

        match &result {
            AttemptResult::Success(body) => {
                info!(attempt = attempt.0, response = %body, "registration succeeded");
                self.ui.show_success();
                self.schedule_navigation(attempt);
            }
            AttemptResult::Failure(failure) => {
                warn!(
                    attempt = attempt.0,
                    kind = ?failure.kind,
                    message = %failure.message,
                    "registration failed"
                );
                self.ui.show_error(ErrorScope::General, failure.user_message());
                guard.general_error = Some(GeneralErrorOwner::Attempt(attempt));
                self.schedule_error_clear(attempt);
            }
        }

        self.release_trigger();
        guard.submission
    }

    fn release_trigger(&self) {
        self.ui.set_submitting_label(false);
        self.ui.set_submit_enabled(true);
    }

    /// Every successful attempt navigates once its display delay elapses, even if a newer
    /// attempt has started since. Only a navigation already done for a later success
    /// makes this one redundant.
    fn schedule_navigation(self: &Arc<Self>, attempt: AttemptId) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_DISPLAY_DELAY).await;
            let mut guard = controller.inner.lock().await;
            if guard.navigated_for.is_some_and(|done| done >= attempt) {
                debug!(attempt = attempt.0, "already navigated for a later attempt");
                return;
            }
            guard.navigated_for = Some(attempt);
            controller.ui.hide_success_and_navigate();
        });
    }

    fn schedule_error_clear(self: &Arc<Self>, attempt: AttemptId) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(ERROR_DISPLAY_DELAY).await;
            let mut guard = controller.inner.lock().await;
            if guard.general_error == Some(GeneralErrorOwner::Attempt(attempt)) {
                controller.ui.clear_error(ErrorScope::General);
                guard.general_error = None;
            } else {
                debug!(attempt = attempt.0, "stale error timer; general error left as is");
            }
        });
    }

    pub async fn on_connectivity_changed(&self, connectivity: Connectivity) {
        let mut guard = self.inner.lock().await;
        if guard.connectivity == connectivity {
            return;
        }
        guard.connectivity = connectivity;

        match connectivity {
            Connectivity::Offline => {
                warn!("network connection lost");
                self.ui.show_error(ErrorScope::General, OFFLINE_MESSAGE);
                guard.general_error = Some(GeneralErrorOwner::Connectivity);
            }
            Connectivity::Online => info!("network connection restored"),
        }
    }

    pub fn on_field_blurred(&self, field: FormField) {
        if self.ui.is_field_valid(field) {
            self.ui.clear_error(ErrorScope::Field(field));
        } else {
            self.ui.show_error(ErrorScope::Field(field), field.required_message());
        }
    }

    pub fn on_field_edited(&self, field: FormField) {
        self.ui.clear_error(ErrorScope::Field(field));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
