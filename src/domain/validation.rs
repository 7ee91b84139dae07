/// Reasons a contact form submission is rejected before anything leaves the client.
///
/// The `Display` text is what the form shows to the visitor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LeadValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("The name is too long")]
    NameTooLong,
}
