//! Inputs to the submission controller.

use shared::domain::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    SubmitTriggered,
    ConnectivityChanged(Connectivity),
    FieldBlurred(FormField),
    FieldEdited(FormField),
}

impl ControllerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ControllerEvent::SubmitTriggered => "submit_triggered",
            ControllerEvent::ConnectivityChanged(_) => "connectivity_changed",
            ControllerEvent::FieldBlurred(_) => "field_blurred",
            ControllerEvent::FieldEdited(_) => "field_edited",
        }
    }
}
