use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    config::{debug_from_env, normalize_base_url},
    dispatch_event, event_channel, load_config, run_event_loop, ControllerEvent, ErrorScope,
    RegistrationUi, SubmissionController, SubmissionState, SUBMITTING_LABEL,
};
use shared::domain::{FormField, FormFields, RegistrationStatus};
use tokio::sync::Notify;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(about = "Submit a registration to the registration service")]
struct Args {
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    #[arg(long)]
    debug: bool,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// One of: confirmed, tentative, declined.
    #[arg(long, default_value = "")]
    status: String,
}

/// Renders controller output on stdout; the form is whatever came in on the command line.
struct TerminalUi {
    fields: FormFields,
    navigated: Arc<Notify>,
}

impl RegistrationUi for TerminalUi {
    fn is_field_valid(&self, field: FormField) -> bool {
        let value = self.fields.get(field).trim();
        match field {
            FormField::Name => !value.is_empty(),
            FormField::Email => value
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.')),
            FormField::Phone => value.chars().filter(char::is_ascii_digit).count() >= 7,
            FormField::Status => value.parse::<RegistrationStatus>().is_ok(),
        }
    }

    fn read_form_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn show_success(&self) {
        println!("Registration successful!");
    }

    fn hide_success_and_navigate(&self) {
        println!("Continuing to payment.");
        self.navigated.notify_one();
    }

    fn show_error(&self, scope: ErrorScope, message: &str) {
        match scope {
            ErrorScope::General => eprintln!("error: {message}"),
            ErrorScope::Field(field) => eprintln!("error [{field}]: {message}"),
        }
    }

    fn clear_error(&self, _scope: ErrorScope) {}

    fn set_submit_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "submit trigger");
    }

    fn set_submitting_label(&self, active: bool) {
        if active {
            println!("{SUBMITTING_LABEL}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Installed before the config loads; the file may still switch debug on below.
    let rust_log = EnvFilter::try_from_default_env().ok();
    let rust_log_set = rust_log.is_some();
    let early_debug = args.debug || debug_from_env(|key| std::env::var(key).ok()).unwrap_or(false);
    let (filter, filter_handle) =
        reload::Layer::new(rust_log.unwrap_or_else(|| level_filter(early_debug)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let mut config = load_config()?;
    if let Some(base_url) = &args.base_url {
        config.base_url = normalize_base_url(base_url)?;
    }
    if let Some(timeout_ms) = args.timeout_ms.filter(|ms| *ms > 0) {
        config.timeout = Duration::from_millis(timeout_ms);
    }
    config.debug |= args.debug;
    if config.debug && !early_debug && !rust_log_set {
        filter_handle.reload(level_filter(true))?;
    }
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "loaded config");

    let navigated = Arc::new(Notify::new());
    let ui = Arc::new(TerminalUi {
        fields: FormFields {
            name: args.name,
            email: args.email,
            phone: args.phone,
            status: args.status,
        },
        navigated: navigated.clone(),
    });

    let controller = SubmissionController::from_config(&config, ui);
    let (tx, rx) = event_channel();
    let event_loop = tokio::spawn(run_event_loop(controller.clone(), rx));

    dispatch_event(&tx, ControllerEvent::SubmitTriggered);
    drop(tx);
    event_loop.await?;

    match controller.state().await {
        SubmissionState::Succeeded => {
            navigated.notified().await;
            Ok(())
        }
        SubmissionState::Failed => bail!("registration was not accepted"),
        SubmissionState::Idle | SubmissionState::Submitting => {
            bail!("registration form is incomplete")
        }
    }
}

fn level_filter(debug: bool) -> EnvFilter {
    EnvFilter::new(if debug { "debug" } else { "info" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui(fields: FormFields) -> TerminalUi {
        TerminalUi {
            fields,
            navigated: Arc::new(Notify::new()),
        }
    }

    #[test]
    fn complete_form_passes_every_field_check() {
        let ui = ui(FormFields {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "555-123-4567".into(),
            status: "confirmed".into(),
        });
        assert!(ui.is_valid_form());
    }

    #[test]
    fn debug_switch_selects_filter_level() {
        assert_eq!(level_filter(true).to_string(), "debug");
        assert_eq!(level_filter(false).to_string(), "info");
    }

    #[test]
    fn field_checks_flag_each_bad_value() {
        let ui = ui(FormFields {
            name: "  ".into(),
            email: "jane.example.com".into(),
            phone: "12".into(),
            status: "perhaps".into(),
        });
        for field in FormField::ALL {
            assert!(!ui.is_field_valid(field), "{field} should be invalid");
        }
    }
}
