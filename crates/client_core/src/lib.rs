//! Client-side registration flow: bounded-time transport, the submission state machine,
//! and the configuration both are built from.

pub mod config;
pub mod controller;
pub mod transport;
pub mod ui;

pub use config::{load_config, ApiConfig};
pub use controller::{
    events::{Connectivity, ControllerEvent},
    orchestration::{dispatch_event, event_channel, run_event_loop},
    reducer::SubmissionState,
    SubmissionController, ERROR_DISPLAY_DELAY, SUCCESS_DISPLAY_DELAY,
};
pub use transport::{HttpTransport, RegistrationTransport};
pub use ui::{ErrorScope, RegistrationUi, SUBMITTING_LABEL};
