use serde::{Deserialize, Serialize};

/// JWT payload carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,         // user ID
    pub username: String, // login name at issue time
    pub exp: i64,         // expires at (unix timestamp)
}
