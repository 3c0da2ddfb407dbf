use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::{auth::Tokenizer, db_interaction::get_user_by_username, password::verify_password, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]*$").unwrap());
static PASSWORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_@!]*$").unwrap());

// Verified when the username is unknown so both failure paths cost an argon2 check
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

#[derive(Deserialize, Validate)]
pub struct LoginJson{
    #[validate(length(min = 1, max = 50), regex(path = *USERNAME_PATTERN))]
    pub username: String,
    #[validate(length(min = 1, max = 50), regex(path = *PASSWORD_PATTERN))]
    pub password: String
}

#[derive(Error)]
pub enum LoginError{
    #[error("username or password has an invalid format")]
    ValidationError(#[from] ValidationErrors),
    #[error("FAILED")]
    InvalidCredentials,
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for LoginError {
    fn status_code(&self) -> StatusCode {
        match self {
            LoginError::ValidationError(_) => StatusCode::BAD_REQUEST,
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).json(self.to_string())
    }
}

/// Issues a signed credential for a matching username / password pair.
#[tracing::instrument(
    "Logging in user",
    skip(pool, tokenizer, json),
    fields(username = %json.username)
)]
pub async fn login(
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    json: web::Json<LoginJson>
) -> Result<HttpResponse, LoginError>{
    json.validate()?;
    let LoginJson{ username, password } = json.into_inner();

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let user = get_user_by_username(conn, username).await?;

    let (user_id, stored_hash) = match user {
        Some(user) => (Some(user.id_user), user.password),
        None => (None, FALLBACK_PASSWORD_HASH.to_string())
    };

    let verified = verify_password(SecretString::from(password), stored_hash).await?;

    let user_id = match (user_id, verified) {
        (Some(user_id), true) => user_id,
        _ => {
            tracing::info!("Username or password did not match");
            return Err(LoginError::InvalidCredentials)
        }
    };

    let credential = tokenizer.issue(user_id)
        .context("Failed to sign credential")?;

    Ok(HttpResponse::Ok().json(credential))
}
