pub mod authentication;
pub mod health_check;
pub mod items;
pub mod purchase;
pub mod reports;

use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

pub use authentication::login;
pub use health_check::health_check;
pub use items::{add_qty, delete_item, get_items, new_item, update_item};
pub use purchase::beli;
pub use reports::{get_profit, report, transaction_history};

// Protected routes take their query string this way so a malformed one is only
// rejected after the credential has been checked
pub type QueryResult<T> = Result<web::Query<T>, actix_web::Error>;

pub const DONE: &str = "DONE";
pub const FAILED: &str = "FAILED";

// Body shared by the write endpoints
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct StatusMessage{
    pub message: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i32>
}

impl StatusMessage {
    pub fn new(message: &str, status: &str) -> Self{
        Self{
            message: message.to_string(),
            status: status.to_string(),
            available: None
        }
    }
}

pub fn failed_response(status_code: StatusCode, message: &str) -> HttpResponse{
    HttpResponse::build(status_code).json(StatusMessage::new(message, FAILED))
}
