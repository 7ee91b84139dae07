pub mod contact_form;
pub mod notice;

pub use contact_form::{
    ContactForm, FormFields, FormState, SubmissionOutcome, SUCCESS_TOAST, TRANSPORT_ERROR_MESSAGE,
};
pub use notice::{Notice, NoticeKind, NoticeRegion, NOTICE_LIFETIME};
