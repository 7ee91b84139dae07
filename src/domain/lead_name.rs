use unicode_segmentation::UnicodeSegmentation;

use crate::domain::validation::LeadValidationError;

const MAX_CHAR_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LeadName(String);

impl LeadName {
    /// Keeps the trimmed name. Anything a visitor types is accepted as long as it is not blank.
    pub fn parse(name: &str) -> Result<LeadName, LeadValidationError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(LeadValidationError::MissingFields);
        }

        if name.graphemes(true).count() > MAX_CHAR_LENGTH {
            return Err(LeadValidationError::NameTooLong);
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for LeadName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
