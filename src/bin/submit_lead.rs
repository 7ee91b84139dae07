//! Sends one lead through the contact form, the same way the landing page does.
//!
//! Usage: submit_lead <name> <phone> [source]

use std::process::ExitCode;

use lead_intake::config::get_configuration;
use lead_intake::submission::{ContactForm, SubmissionOutcome};
use lead_intake::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = get_subscriber(String::from("submit_lead"), String::from("warn"));

    init_subscriber(subscriber);

    let mut args = std::env::args().skip(1);
    let (name, phone) = match (args.next(), args.next()) {
        (Some(name), Some(phone)) => (name, phone),
        _ => {
            eprintln!("Usage: submit_lead <name> <phone> [source]");
            return ExitCode::from(2);
        }
    };

    let mut config = match get_configuration() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to read the configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(source) = args.next() {
        config.lead_client.source = Some(source);
    }

    let form = match ContactForm::from_settings(&config.lead_client) {
        Ok(form) => form,
        Err(err) => {
            eprintln!("Failed to build the HTTP client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if !form.is_endpoint_configured() {
        eprintln!("No endpoint configured, the lead will only be logged.");
    }

    form.fill(&name, &phone);

    let outcome = form.submit().await;
    let notice = form.toast().or_else(|| form.message());

    if let Some(notice) = notice {
        println!("{}", notice.text);
    }

    match outcome {
        SubmissionOutcome::Delivered(_) => ExitCode::SUCCESS,
        SubmissionOutcome::Rejected(_) => ExitCode::from(2),
        SubmissionOutcome::Busy | SubmissionOutcome::Failed(_) => ExitCode::FAILURE,
    }
}
