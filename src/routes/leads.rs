use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use chrono_tz::Tz;

use crate::domain::lead_row::InvalidTimestamp;
use crate::domain::{LeadRow, NewLeadBody};
use crate::spreadsheet::{Spreadsheet, SpreadsheetError};

/// The worksheet new leads are appended to.
pub struct LeadWorksheet {
    pub name: String,
    pub timezone: Tz,
}

#[derive(serde::Serialize)]
struct AppendSucceeded {
    success: bool,
    message: &'static str,
}

#[derive(serde::Serialize)]
struct AppendFailed {
    success: bool,
    error: String,
}

#[tracing::instrument(
    name = "Appending a lead to the spreadsheet",
    skip(body, spreadsheet, worksheet),
    fields(worksheet = %worksheet.name)
)]
pub async fn append_lead(
    body: web::Bytes,
    spreadsheet: web::Data<Spreadsheet>,
    worksheet: web::Data<LeadWorksheet>,
) -> Result<HttpResponse, AppendLeadError> {
    // Parsed by hand so a malformed body still gets a JSON answer
    let body: NewLeadBody =
        serde_json::from_slice(&body).map_err(AppendLeadError::MalformedBody)?;
    let row = LeadRow::from_body(body, &worksheet.timezone, Utc::now())?;
    let worksheet_name = worksheet.name.clone();

    web::block(move || spreadsheet.append_row(&worksheet_name, &row)).await??;

    Ok(HttpResponse::Ok().json(AppendSucceeded {
        success: true,
        message: "Data saved",
    }))
}

#[derive(thiserror::Error)]
pub enum AppendLeadError {
    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error(transparent)]
    InvalidTimestamp(#[from] InvalidTimestamp),
    #[error("Failed to save the lead in the spreadsheet.")]
    StorageError(#[from] SpreadsheetError),
    #[error("Failed to save the lead in the spreadsheet.")]
    BlockingError(#[from] actix_web::error::BlockingError),
}

impl std::fmt::Debug for AppendLeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)?;
        if let Some(source) = std::error::Error::source(self) {
            write!(f, "\n\t({})", source)?;
        }
        Ok(())
    }
}

impl ResponseError for AppendLeadError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppendLeadError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppendLeadError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
            AppendLeadError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppendLeadError::BlockingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(AppendFailed {
            success: false,
            error: self.to_string(),
        })
    }
}
