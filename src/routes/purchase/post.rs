use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::{auth::Authenticated, db_interaction::{record_purchase, PurchaseError}, models::NewPurchase, routes::{failed_response, StatusMessage, DONE, FAILED}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug, Validate)]
pub struct PurchaseJson{
    pub id_barang: i32,
    #[validate(range(min = 1))]
    pub qty: i32,
    #[validate(length(min = 1, max = 100))]
    pub nama: String
}

#[derive(Error)]
pub enum BeliError{
    #[error("invalid purchase data. ")]
    ValidationError(#[from] ValidationErrors),
    #[error("Request more Qty than available Qty.")]
    PurchaseError(#[from] PurchaseError),
    #[error("Purchase failed. ")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for BeliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for BeliError {
    fn status_code(&self) -> StatusCode {
        match self {
            BeliError::ValidationError(_) => StatusCode::BAD_REQUEST,
            BeliError::PurchaseError(PurchaseError::InsufficientStock{ .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    // Insufficient stock is an expected outcome and tells the caller what is left
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            BeliError::PurchaseError(PurchaseError::InsufficientStock{ available }) => {
                HttpResponse::Conflict().json(StatusMessage{
                    message: self.to_string(),
                    status: FAILED.to_string(),
                    available: Some(*available)
                })
            },
            BeliError::PurchaseError(_) => {
                failed_response(self.status_code(), "Purchase failed. ")
            },
            _ => failed_response(self.status_code(), &self.to_string())
        }
    }
}

#[tracing::instrument(
    "Purchasing item",
    skip(pool, user)
)]
pub async fn beli(
    pool: web::Data<DbPool>,
    json: web::Json<PurchaseJson>,
    user: Authenticated
) -> Result<HttpResponse, BeliError>{
    json.validate()?;
    let PurchaseJson{ id_barang, qty, nama } = json.into_inner();

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let purchase = NewPurchase{
        nama_pembeli: nama,
        id_barang,
        qty_pembelian: qty
    };

    match record_purchase(conn, purchase).await {
        Ok(()) => {
            tracing::info!(id_barang, qty, recorded_by = user.0, "Purchase recorded");
            Ok(HttpResponse::Ok().json(StatusMessage::new("Purchased Succesfully", DONE)))
        },
        Err(PurchaseError::InsufficientStock{ available }) => {
            tracing::info!(id_barang, qty, available, "Not enough stock for purchase");
            Err(PurchaseError::InsufficientStock{ available }.into())
        },
        Err(e) => {
            tracing::error!("{:?}", e);
            Err(e.into())
        }
    }
}
