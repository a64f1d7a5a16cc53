use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::config::JwtConfig;

/// Why a session token was refused. Callers facing clients collapse these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

/// HS256 signing and verification keys for session tokens.
///
/// Tokens are stateless: validity is the signature plus `exp`, so a leaked token
/// stays usable until it expires. There is no revocation list.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(cfg.secret.as_bytes(), cfg.ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `user_id` that expires `ttl` from now.
    pub fn issue(&self, user_id: i64, username: &str) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let token = self.sign(&Claims {
            sub: user_id,
            username: username.to_owned(),
            exp: exp.unix_timestamp(),
        })?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> anyhow::Result<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before exp.
        if OffsetDateTime::now_utc().unix_timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        debug!(user_id = data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}
