use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::{auth::Authenticated, db_interaction::get_transaction_history, domain::DateRangeQuery, routes::QueryResult, utils::{get_pooled_connection, DbPool}};

use super::ReportQueryError;

#[tracing::instrument(
    "Getting transaction history",
    skip(pool, _user)
)]
pub async fn transaction_history(
    pool: web::Data<DbPool>,
    query: QueryResult<DateRangeQuery>,
    _user: Authenticated
) -> Result<HttpResponse, ReportQueryError> {
    let query = query.map_err(|e| {
        tracing::info!(error = %e, "Rejected query string");
        ReportQueryError::InvalidQuery
    })?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let rows = get_transaction_history(conn, query.range())
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;

    Ok(HttpResponse::Ok().json(rows))
}
