use actix_web::{web, HttpResponse};

use crate::utils::{get_pooled_connection, DbPool};

// Also reports whether a store connection can be checked out
#[tracing::instrument(
    "Checking if api and database are online",
    skip(pool)
)]
pub async fn health_check(pool: web::Data<DbPool>) -> HttpResponse{
    match get_pooled_connection(&pool).await {
        Ok(_) => HttpResponse::Ok().body("Working"),
        Err(e) => {
            tracing::error!("{:?}", e);
            HttpResponse::ServiceUnavailable().body("Database unavailable")
        }
    }
}
