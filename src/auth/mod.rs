pub mod credential;
pub mod extractors;
pub mod gate;
pub mod jwt;

pub use credential::{unwrap_user_id, wrap_user_id};
pub use extractors::{Authenticated, AuthError, AUTH_HEADER};
pub use gate::{authenticate, AuthVerdict};
pub use jwt::{TokenError, Tokenizer};
