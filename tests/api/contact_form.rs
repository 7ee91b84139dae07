use claim::assert_matches;
use lead_intake::lead_client::{Delivery, LeadClient, LeadEndpoint, TransportMode};
use lead_intake::submission::{ContactForm, SubmissionOutcome, SUCCESS_TOAST};

use crate::helpers::TestApp;

fn form_for(test_app: &TestApp, transport: TransportMode, source: Option<String>) -> ContactForm {
    let lead_client = LeadClient::new(LeadEndpoint::parse(&test_app.leads_url()), transport, None)
        .expect("Failed to build the lead client.");

    ContactForm::new(lead_client, source)
}

#[tokio::test]
async fn observed_submission_is_confirmed_and_saved() {
    let test_app = TestApp::spawn_app().await;
    let form = form_for(&test_app, TransportMode::Observed, None);

    form.fill("Тест Тестов", "+996 555 123456");

    assert_matches!(
        form.submit().await,
        SubmissionOutcome::Delivered(Delivery::Confirmed)
    );
    assert_eq!(form.toast().map(|toast| toast.text), Some(String::from(SUCCESS_TOAST)));

    let rows = test_app.saved_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Тест Тестов");
    assert_eq!(rows[0].phone, "+996 555 123456");
    assert_eq!(rows[0].source, "");
}

#[tokio::test]
async fn opaque_submission_is_saved_without_being_confirmed() {
    let test_app = TestApp::spawn_app().await;
    let form = form_for(
        &test_app,
        TransportMode::Opaque,
        Some(String::from("https://example.com/landing")),
    );

    form.fill("  Тест Тестов  ", " +996 555 123456 ");

    assert_matches!(
        form.submit().await,
        SubmissionOutcome::Delivered(Delivery::Dispatched)
    );

    let rows = test_app.saved_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Тест Тестов");
    assert_eq!(rows[0].phone, "+996 555 123456");
    assert_eq!(rows[0].source, "https://example.com/landing");
}

#[tokio::test]
async fn rejected_submission_never_reaches_the_spreadsheet() {
    let test_app = TestApp::spawn_app().await;
    let form = form_for(&test_app, TransportMode::Observed, None);

    form.fill("Тест Тестов", "12345");

    assert_matches!(form.submit().await, SubmissionOutcome::Rejected(_));
    assert!(!test_app.worksheet_path().exists());
}
