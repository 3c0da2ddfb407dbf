use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::{auth::Authenticated, db_interaction::{update_item as update_item_in_db, ItemWriteError}, routes::{failed_response, StatusMessage}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

use super::ItemJson;

#[derive(Error)]
pub enum UpdateItemError{
    #[error("invalid item data. ")]
    ValidationError(#[from] ValidationErrors),
    #[error("Data barang update failed. ")]
    WriteError(#[from] ItemWriteError),
    #[error("Data barang update failed. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UpdateItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for UpdateItemError {
    fn status_code(&self) -> StatusCode {
        match self {
            UpdateItemError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UpdateItemError::WriteError(ItemWriteError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}

// Replaces every field of an active item
#[tracing::instrument(
    "Updating item",
    skip(pool, _user)
)]
pub async fn update_item(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    json: web::Json<ItemJson>,
    _user: Authenticated
) -> Result<HttpResponse, UpdateItemError>{
    json.validate()?;
    let id_barang = path.into_inner();

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    update_item_in_db(conn, id_barang, json.into_inner().into())
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(StatusMessage::new("Data barang updated Succesfully. ", "OK")))
}
