use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use serde_json::json;
use thiserror::Error;

use crate::{auth::Authenticated, db_interaction::{soft_delete_item, ItemWriteError}, routes::failed_response, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Error)]
pub enum DeleteItemError{
    #[error("Deleting barang failed. ")]
    WriteError(#[from] ItemWriteError),
    #[error("Deleting barang failed. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for DeleteItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for DeleteItemError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}

// Re-deleting is a silent no-op, the response does not distinguish it
#[tracing::instrument(
    "Soft deleting item by id",
    skip(pool, _user)
)]
pub async fn delete_item(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    _user: Authenticated
) -> Result<HttpResponse, DeleteItemError>{
    let id_barang = path.into_inner();

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let affected_rows = soft_delete_item(conn, id_barang)
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;
    tracing::info!(affected_rows, "Soft delete finished");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("DELETED barang with id of: {}", id_barang)
    })))
}
