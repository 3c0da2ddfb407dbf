use std::{error::Error, fmt::Debug};

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{configuration::AuthSettings, utils::error_fmt_chain};

use super::credential::{unwrap_user_id, wrap_user_id};

#[derive(Error)]
pub enum TokenError{
    #[error("auth.expiry_hours of {0} is out of range")]
    ExpiryOutOfRange(u64),
    #[error("Failed to sign token")]
    EncodeError(#[from] jsonwebtoken::errors::Error)
}

impl Debug for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Signs and verifies the credential issued at login
#[derive(Clone)]
pub struct Tokenizer{
    pub secret: SecretString,
    pub expiry_hours: u64
}

impl Tokenizer {
    pub fn new(settings: &AuthSettings) -> Self {
        Self{
            secret: settings.secret.clone(),
            expiry_hours: settings.expiry_hours
        }
    }

    pub fn issue(&self, user_id: i32) -> Result<String, TokenError>{
        let now = Utc::now();
        let expiry = i64::try_from(self.expiry_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::ExpiryOutOfRange(self.expiry_hours))?;

        let claims = Claims{
            sub: wrap_user_id(user_id),
            iat: now.timestamp() as usize,
            exp: expiry.timestamp() as usize
        };

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
        )?;

        Ok(token)
    }

    // Signature and expiry are checked before the subject is unwrapped
    pub fn decode(&self, token: &str) -> Option<i32>{
        let claims = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256)
        )
        .ok()?
        .claims;

        unwrap_user_id(&claims.sub)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims{
    pub sub: String,
    pub iat: usize,
    pub exp: usize
}
