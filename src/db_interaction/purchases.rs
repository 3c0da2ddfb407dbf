use std::{error::Error, fmt::Debug};

use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use thiserror::Error;

use crate::{models::NewPurchase, schema::{barang, pembelian}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Error associated with recording a purchase and decrementing stock
#[derive(Error)]
pub enum PurchaseError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Requested qty exceeds available qty of {available}")]
    InsufficientStock{ available: i32 }
}

impl Debug for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

/// Decrements stock and records the purchase in one transaction.
///
/// The decrement only matches an active row holding at least the requested
/// qty, so concurrent purchases can never oversell. When it matches nothing the
/// current qty (0 for missing or deleted items) is reported and nothing is written.
#[tracing::instrument(
    "Recording purchase and decrementing stock",
    skip(conn)
)]
pub async fn record_purchase(
    mut conn: DbConnection,
    purchase: NewPurchase
) -> Result<(), PurchaseError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<(), PurchaseError, _>(|conn| {
            let affected_rows = diesel::update(barang::table)
                .filter(barang::id_barang.eq(purchase.id_barang))
                .filter(barang::deleted_on.is_null())
                .filter(barang::qty.ge(purchase.qty_pembelian))
                .set(barang::qty.eq(barang::qty - purchase.qty_pembelian))
                .execute(conn)?;

            if affected_rows == 0 {
                let available = barang::table
                    .filter(barang::id_barang.eq(purchase.id_barang))
                    .filter(barang::deleted_on.is_null())
                    .select(barang::qty)
                    .first::<i32>(conn)
                    .optional()?
                    .unwrap_or(0);

                return Err(PurchaseError::InsufficientStock{ available })
            }

            diesel::insert_into(pembelian::table)
                .values(&purchase)
                .execute(conn)?;

            Ok(())
        })
    })
    .await??;

    Ok(())
}
