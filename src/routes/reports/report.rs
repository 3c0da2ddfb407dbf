use std::{error::Error, fmt::Debug};

use actix_web::{http::{header::{ContentDisposition, DispositionParam, DispositionType}, StatusCode}, web, HttpResponse, ResponseError};
use anyhow::Context;
use thiserror::Error;

use crate::{auth::Authenticated, db_interaction::get_report_data, domain::DateRangeQuery, report::{render_report, ReportRenderError}, routes::{failed_response, QueryResult}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Error)]
pub enum ReportError{
    #[error("from_ and to_ must be dates formatted as YYYY-MM-DD. ")]
    InvalidQuery,
    #[error("Failed to render report")]
    RenderError(#[from] ReportRenderError),
    #[error("Failed to build report")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ReportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReportError::InvalidQuery => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        failed_response(self.status_code(), &self.to_string())
    }
}

/// Sales report per item over the requested days, as a PDF.
#[tracing::instrument(
    "Rendering sales report",
    skip(pool, _user)
)]
pub async fn report(
    pool: web::Data<DbPool>,
    query: QueryResult<DateRangeQuery>,
    _user: Authenticated
) -> Result<HttpResponse, ReportError>{
    let query = query.map_err(|e| {
        tracing::info!(error = %e, "Rejected query string");
        ReportError::InvalidQuery
    })?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let data = get_report_data(conn, query.range())
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;
    let subtitle = query.describe();

    let pdf = spawn_blocking_with_tracing(move || render_report(&subtitle, &data))
        .await
        .context("Failed due to threadpool error")?
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition{
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename("laporan.pdf".to_string())]
        })
        .body(pdf))
}
