use std::fmt::Display;

use actix_web::web;
use anyhow::Context;

use crate::{db_interaction::user_exists, utils::{get_pooled_connection, DbPool}};

use super::jwt::Tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVerdict{
    Valid(i32),
    Invalid
}

impl Display for AuthVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthVerdict::Valid(_) => write!(f, "VALID"),
            AuthVerdict::Invalid => write!(f, "INVALID")
        }
    }
}

/// Decides whether `credential` belongs to a user that currently exists.
///
/// A credential that fails to decode is INVALID without touching the store.
/// Store failures are returned as errors instead of being folded into INVALID.
#[tracing::instrument(
    "Authenticating credential",
    skip_all
)]
pub async fn authenticate(
    pool: &web::Data<DbPool>,
    tokenizer: &Tokenizer,
    credential: &str
) -> Result<AuthVerdict, anyhow::Error>{
    let user_id = match tokenizer.decode(credential) {
        Some(id) => id,
        None => {
            tracing::info!("Credential could not be decoded");
            return Ok(AuthVerdict::Invalid)
        }
    };

    let conn = get_pooled_connection(pool)
                .await
                .context("Failed to get connection from pool")?;

    if user_exists(conn, user_id).await? {
        Ok(AuthVerdict::Valid(user_id))
    } else {
        tracing::info!(user_id, "Credential refers to a user that does not exist");
        Ok(AuthVerdict::Invalid)
    }
}
