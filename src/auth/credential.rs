//! The readable part of a credential: `user{id}authorize`.
//!
//! On its own this string is forgeable, so it only ever travels as the
//! `sub` claim of a signed token (see [`crate::auth::jwt::Tokenizer`]).

pub const CREDENTIAL_PREFIX: &str = "user";
pub const CREDENTIAL_SUFFIX: &str = "authorize";

pub fn wrap_user_id(user_id: i32) -> String{
    format!("{}{}{}", CREDENTIAL_PREFIX, user_id, CREDENTIAL_SUFFIX)
}

/// Strips the prefix and suffix and parses what is left as a user id.
/// Anything other than plain decimal digits in between is rejected.
pub fn unwrap_user_id(credential: &str) -> Option<i32>{
    let digits = credential
        .strip_prefix(CREDENTIAL_PREFIX)?
        .strip_suffix(CREDENTIAL_SUFFIX)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None
    }

    digits.parse::<i32>().ok()
}
