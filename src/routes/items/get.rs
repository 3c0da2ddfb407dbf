use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::{auth::Authenticated, db_interaction::get_active_items, routes::{failed_response, QueryResult}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetItemsQuery{
    pub jumlah: Option<u32>
}

#[derive(Error)]
pub enum GetItemsError{
    #[error("jumlah must be a non-negative number. ")]
    InvalidQuery,
    #[error("Failed to get items. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for GetItemsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for GetItemsError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetItemsError::InvalidQuery => StatusCode::BAD_REQUEST,
            GetItemsError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}

#[tracing::instrument(
    "Listing active items",
    skip(pool, _user)
)]
pub async fn get_items(
    pool: web::Data<DbPool>,
    query: QueryResult<GetItemsQuery>,
    _user: Authenticated
) -> Result<HttpResponse, GetItemsError> {
    let query = query.map_err(|e| {
        tracing::info!(error = %e, "Rejected query string");
        GetItemsError::InvalidQuery
    })?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let items = get_active_items(conn, query.jumlah.map(i64::from))
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(items))
}
