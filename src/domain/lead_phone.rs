use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::validation::LeadValidationError;

// ASCII digits only; `\d` would also admit other Unicode digit classes.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s+\-()]{10,}$").expect("phone pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LeadPhone(String);

impl LeadPhone {
    pub fn parse(phone: &str) -> Result<LeadPhone, LeadValidationError> {
        let phone = phone.trim();

        if phone.is_empty() {
            return Err(LeadValidationError::MissingFields);
        }

        if !PHONE_REGEX.is_match(phone) {
            return Err(LeadValidationError::InvalidPhone);
        }

        Ok(Self(phone.to_string()))
    }
}

impl AsRef<str> for LeadPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
