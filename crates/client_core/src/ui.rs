//! Contract the submission controller drives. Front-ends implement it; calls must be
//! idempotent since delayed follow-ups may land after the view has moved on.

use shared::domain::{FormField, FormFields};

pub const SUBMITTING_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorScope {
    General,
    Field(FormField),
}

pub trait RegistrationUi: Send + Sync {
    /// Opaque per-field validation predicate.
    fn is_field_valid(&self, field: FormField) -> bool;

    fn is_valid_form(&self) -> bool {
        FormField::ALL.iter().all(|field| self.is_field_valid(*field))
    }

    fn read_form_fields(&self) -> FormFields;

    fn show_success(&self);

    fn hide_success_and_navigate(&self);

    fn show_error(&self, scope: ErrorScope, message: &str);

    fn clear_error(&self, scope: ErrorScope);

    fn set_submit_enabled(&self, enabled: bool);

    /// Swap the trigger caption to [`SUBMITTING_LABEL`] while `active`, restore it otherwise.
    fn set_submitting_label(&self, _active: bool) {}
}
