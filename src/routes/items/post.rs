use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::{auth::Authenticated, db_interaction::{insert_item, ItemWriteError}, routes::{failed_response, StatusMessage, DONE}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

use super::ItemJson;

#[derive(Error)]
pub enum NewItemError{
    #[error("invalid item data. ")]
    ValidationError(#[from] ValidationErrors),
    #[error("adding new item failed. ")]
    InsertError(#[from] ItemWriteError),
    #[error("adding new item failed. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for NewItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for NewItemError {
    fn status_code(&self) -> StatusCode {
        match self {
            NewItemError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}

#[tracing::instrument(
    "Adding new item to catalog",
    skip(pool, user)
)]
pub async fn new_item(
    pool: web::Data<DbPool>,
    json: web::Json<ItemJson>,
    user: Authenticated
) -> Result<HttpResponse, NewItemError>{
    json.validate()?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let id_barang = insert_item(conn, json.into_inner().into())
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;
    tracing::info!(id_barang, added_by = user.0, "Item added");

    Ok(HttpResponse::Ok().json(StatusMessage::new("Succesfully added new item. ", DONE)))
}
