use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, FromRequest, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use thiserror::Error;

use crate::utils::{error_fmt_chain, DbPool};

use super::{gate::{authenticate, AuthVerdict}, jwt::Tokenizer};

pub const AUTH_HEADER: &str = "token";

// Extractor for protected routes, holds the authenticated user id
#[derive(Debug)]
pub struct Authenticated(pub i32);

#[derive(Error)]
pub enum AuthError{
    #[error("INVALID")]
    Invalid,
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Invalid => StatusCode::UNAUTHORIZED,
            AuthError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    // The verdict itself is the body on refusal
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            AuthError::Invalid => HttpResponse::Unauthorized()
                .json(AuthVerdict::Invalid.to_string()),
            AuthError::UnexpectedError(_) => HttpResponse::InternalServerError()
                .json(serde_json::json!({
                    "message": "authentication failed. ",
                    "status": "FAILED"
                }))
        }
    }
}

impl FromRequest for Authenticated {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let tokenizer = req.app_data::<web::Data<Tokenizer>>().cloned();
        let credential = req.headers()
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string());

        Box::pin(async move {
            let (pool, tokenizer) = match (pool, tokenizer) {
                (Some(pool), Some(tokenizer)) => (pool, tokenizer),
                _ => return Err(AuthError::UnexpectedError(
                    anyhow::anyhow!("Pool or tokenizer missing from app data")
                ))
            };

            let credential = credential.ok_or(AuthError::Invalid)?;

            match authenticate(&pool, &tokenizer, &credential).await {
                Ok(AuthVerdict::Valid(user_id)) => Ok(Authenticated(user_id)),
                Ok(AuthVerdict::Invalid) => Err(AuthError::Invalid),
                Err(e) => {
                    tracing::error!("{:?}", e);
                    Err(AuthError::UnexpectedError(e))
                }
            }
        })
    }
}
