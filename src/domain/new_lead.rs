use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::lead_name::LeadName;
use crate::domain::lead_phone::LeadPhone;
use crate::domain::validation::LeadValidationError;

/// A validated contact request, exactly as it travels to the append endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewLead {
    name: LeadName,
    phone: LeadPhone,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

/// What the append endpoint accepts. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct NewLeadBody {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub timestamp: Option<String>,
    pub source: Option<String>,
}

impl NewLead {
    /// Runs the form checks in order: blank fields first, then the phone pattern.
    pub fn parse(
        name: &str,
        phone: &str,
        source: Option<String>,
    ) -> Result<NewLead, LeadValidationError> {
        if name.trim().is_empty() || phone.trim().is_empty() {
            return Err(LeadValidationError::MissingFields);
        }

        let phone = LeadPhone::parse(phone)?;
        let name = LeadName::parse(name)?;

        Ok(NewLead {
            name,
            phone,
            timestamp: Utc::now(),
            source,
        })
    }

    pub fn name(&self) -> &LeadName {
        &self.name
    }

    pub fn phone(&self) -> &LeadPhone {
        &self.phone
    }
}
