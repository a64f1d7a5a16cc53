//! Session cookie handling.

use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};

use crate::error::ApiError;

pub const AUTH_COOKIE: &str = "auth_token";

/// Attributes shared by the login and logout cookies.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: &'static str,
    pub secure: bool,
    pub max_age: Duration,
}

impl SessionCookie {
    pub fn new(secure: bool, max_age: Duration) -> Self {
        Self {
            name: AUTH_COOKIE,
            secure,
            max_age,
        }
    }

    fn attributes(&self) -> String {
        let mut attrs = String::from("; HttpOnly; Path=/; SameSite=Lax");
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }

    /// `Set-Cookie` value carrying a freshly issued token.
    pub fn issue(&self, token: &str) -> String {
        format!(
            "{}={}{}; Max-Age={}",
            self.name,
            token,
            self.attributes(),
            self.max_age.as_secs()
        )
    }

    /// `Set-Cookie` value telling the client to drop the token.
    pub fn clear(&self) -> String {
        format!(
            "{}={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.name,
            self.attributes()
        )
    }
}

pub fn header_value(cookie: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::internal(anyhow::Error::new(e).context("build Set-Cookie header")))
}

/// Extract a cookie value from request headers. Empty values count as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}
