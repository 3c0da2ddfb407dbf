use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::{auth::Authenticated, db_interaction::{restock_item, ItemWriteError}, routes::{failed_response, QueryResult, StatusMessage, DONE}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug, Validate)]
pub struct AddQtyQuery{
    #[validate(range(min = 0))]
    pub qty: i32
}

#[derive(Error)]
pub enum AddQtyError{
    #[error("qty is missing or not a number. ")]
    InvalidQuery,
    #[error("qty must not be negative. ")]
    ValidationError(#[from] ValidationErrors),
    #[error("Qty fail updating. ")]
    WriteError(#[from] ItemWriteError),
    #[error("Qty fail updating. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for AddQtyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for AddQtyError {
    fn status_code(&self) -> StatusCode {
        match self {
            AddQtyError::InvalidQuery | AddQtyError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AddQtyError::WriteError(ItemWriteError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}

#[tracing::instrument(
    "Restocking item",
    skip(pool, _user)
)]
pub async fn add_qty(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    query: QueryResult<AddQtyQuery>,
    _user: Authenticated
) -> Result<HttpResponse, AddQtyError>{
    let query = query.map_err(|e| {
        tracing::info!(error = %e, "Rejected query string");
        AddQtyError::InvalidQuery
    })?;
    query.validate()?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    restock_item(conn, path.into_inner(), query.qty)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Qty updated. ", DONE)))
}
