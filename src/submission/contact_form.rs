use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::config::LeadClientSettings;
use crate::domain::{LeadValidationError, NewLead};
use crate::lead_client::{Delivery, LeadClient, LeadClientError};
use crate::submission::notice::{Notice, NoticeRegion};

pub const SUCCESS_TOAST: &str = "Thank you! We will call you back shortly.";
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Something went wrong. Please try again later or call us.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// A submission from this form is still in flight.
    Busy,
    Rejected(LeadValidationError),
    Delivered(Delivery),
    Failed(LeadClientError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub phone: String,
}

/// The contact form of the landing page.
///
/// It owns its fields, its submit control and the two places where it talks back to
/// the visitor: an inline message region for errors and a toast for successful
/// submissions.
pub struct ContactForm {
    lead_client: LeadClient,
    source: Option<String>,
    fields: Mutex<FormFields>,
    state: Mutex<FormState>,
    submit_disabled: AtomicBool,
    message: NoticeRegion,
    toast: NoticeRegion,
}

/// Keeps the submit control disabled while alive.
struct SubmitGuard<'a> {
    form: &'a ContactForm,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.form.set_state(FormState::Idle);
        self.form.submit_disabled.store(false, Ordering::SeqCst);
    }
}

impl ContactForm {
    pub fn new(lead_client: LeadClient, source: Option<String>) -> ContactForm {
        ContactForm {
            lead_client,
            source,
            fields: Mutex::new(FormFields::default()),
            state: Mutex::new(FormState::Idle),
            submit_disabled: AtomicBool::new(false),
            message: NoticeRegion::default(),
            toast: NoticeRegion::default(),
        }
    }

    pub fn from_settings(settings: &LeadClientSettings) -> Result<ContactForm, reqwest::Error> {
        let lead_client = LeadClient::new(
            settings.get_endpoint(),
            settings.transport,
            settings.get_timeout(),
        )?;

        Ok(ContactForm::new(lead_client, settings.source.clone()))
    }

    pub fn fill(&self, name: &str, phone: &str) {
        let mut fields = self.fields.lock().unwrap_or_else(PoisonError::into_inner);
        fields.name = name.to_string();
        fields.phone = phone.to_string();
    }

    pub fn fields(&self) -> FormFields {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reset(&self) {
        *self.fields.lock().unwrap_or_else(PoisonError::into_inner) = FormFields::default();
    }

    pub fn state(&self) -> FormState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `false` while the form runs in demonstration mode.
    pub fn is_endpoint_configured(&self) -> bool {
        self.lead_client.is_configured()
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.submit_disabled.load(Ordering::SeqCst)
    }

    pub fn message(&self) -> Option<Notice> {
        self.message.current()
    }

    pub fn toast(&self) -> Option<Notice> {
        self.toast.current()
    }

    pub fn dismiss_toast(&self) {
        self.toast.dismiss();
    }

    /// Validates the fields and sends them once.
    ///
    /// Under the opaque transport a dispatched request counts as a success, the
    /// endpoint's answer is never seen. Only a request that could not be sent at all
    /// shows the error message, and in that case the fields are kept.
    #[tracing::instrument(name = "Submitting the contact form", skip(self))]
    pub async fn submit(&self) -> SubmissionOutcome {
        let _guard = match self.disable_submit() {
            Some(guard) => guard,
            None => {
                tracing::warn!("Submit ignored, a submission is already in flight");
                return SubmissionOutcome::Busy;
            }
        };

        self.set_state(FormState::Validating);

        let fields = self.fields();
        let new_lead = match NewLead::parse(&fields.name, &fields.phone, self.source.clone()) {
            Ok(new_lead) => new_lead,
            Err(err) => {
                tracing::info!("Validation error: {:?}", err);
                self.set_state(FormState::Rejected);
                self.message.show(Notice::error(err.to_string()));
                return SubmissionOutcome::Rejected(err);
            }
        };

        self.set_state(FormState::Submitting);

        match self.lead_client.send_lead(&new_lead).await {
            Ok(delivery) => {
                self.set_state(FormState::Succeeded);
                self.reset();
                self.toast.show(Notice::success(SUCCESS_TOAST));
                SubmissionOutcome::Delivered(delivery)
            }
            Err(err) => {
                tracing::error!("Form submission error: {:?}", err);
                self.set_state(FormState::Failed);
                self.message.show(Notice::error(TRANSPORT_ERROR_MESSAGE));
                SubmissionOutcome::Failed(err)
            }
        }
    }

    fn disable_submit(&self) -> Option<SubmitGuard<'_>> {
        self.submit_disabled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitGuard { form: self })
    }

    fn set_state(&self, new_state: FormState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = new_state;
    }
}
