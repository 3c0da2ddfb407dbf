pub mod history;
pub mod profit;
pub mod report;

use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{routes::failed_response, utils::error_fmt_chain};

pub use history::transaction_history;
pub use profit::get_profit;
pub use report::report;

// Shared by the json reporting routes
#[derive(Error)]
pub enum ReportQueryError{
    #[error("from_ and to_ must be dates formatted as YYYY-MM-DD. ")]
    InvalidQuery,
    #[error("Failed to get report data. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for ReportQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ReportQueryError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReportQueryError::InvalidQuery => StatusCode::BAD_REQUEST,
            ReportQueryError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}
