pub mod lead_name;
pub mod lead_phone;
pub mod lead_row;
pub mod new_lead;
pub mod validation;

pub use lead_name::LeadName;
pub use lead_phone::LeadPhone;
pub use lead_row::LeadRow;
pub use new_lead::{NewLead, NewLeadBody};
pub use validation::LeadValidationError;
