use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;

use crate::{models::{Item, NewItem}, schema::barang, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Error associated with writing to the barang table
#[derive(Error)]
pub enum ItemWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query on barang table")]
    QueryError(#[from] diesel::result::Error),
    #[error("id_barang: {0} doesn't exist or has been deleted")]
    NotFound(i32)
}

impl Debug for ItemWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting item into barang",
    skip(conn)
)]
pub async fn insert_item(
    mut conn: DbConnection,
    item: NewItem
) -> Result<i32, ItemWriteError> {
    let id = spawn_blocking_with_tracing(move || {
        diesel::insert_into(barang::table)
            .values(&item)
            .returning(barang::id_barang)
            .get_result::<i32>(&mut conn)
    })
    .await??;

    Ok(id)
}

#[tracing::instrument(
    "Getting active items from barang",
    skip(conn)
)]
pub async fn get_active_items(
    mut conn: DbConnection,
    limit: Option<i64>
) -> Result<Vec<Item>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        let mut query = barang::table
            .filter(barang::deleted_on.is_null())
            .order(barang::id_barang.asc())
            .select(Item::as_select())
            .into_boxed();

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .load::<Item>(&mut conn)
            .context("Failed to get items")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Full replacement of an active item's fields
#[tracing::instrument(
    "Updating item in barang",
    skip(conn)
)]
pub async fn update_item(
    mut conn: DbConnection,
    id_barang: i32,
    item: NewItem
) -> Result<(), ItemWriteError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::update(barang::table)
            .filter(barang::id_barang.eq(id_barang))
            .filter(barang::deleted_on.is_null())
            .set(&item)
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ItemWriteError::NotFound(id_barang))
    }

    Ok(())
}

#[tracing::instrument(
    "Adding stock to item",
    skip(conn)
)]
pub async fn restock_item(
    mut conn: DbConnection,
    id_barang: i32,
    qty: i32
) -> Result<(), ItemWriteError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::update(barang::table)
            .filter(barang::id_barang.eq(id_barang))
            .filter(barang::deleted_on.is_null())
            .set(barang::qty.eq(barang::qty + qty))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(ItemWriteError::NotFound(id_barang))
    }

    Ok(())
}

// Returns the number of rows marked, zero when already deleted or missing
#[tracing::instrument(
    "Soft deleting item",
    skip(conn)
)]
pub async fn soft_delete_item(
    mut conn: DbConnection,
    id_barang: i32
) -> Result<usize, ItemWriteError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::update(barang::table)
            .filter(barang::id_barang.eq(id_barang))
            .filter(barang::deleted_on.is_null())
            .set(barang::deleted_on.eq(Some(Utc::now())))
            .execute(&mut conn)
    })
    .await??;

    Ok(affected_rows)
}
