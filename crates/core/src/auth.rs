use std::fmt::{Debug, Formatter};

use crate::{AppError, AppResult};

/// Opaque bearer credential identifying one authenticated session.
///
/// The raw value is only reachable through [`SessionToken::expose`], and the
/// `Debug` output is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Creates a session token from a raw bearer value.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Unauthorized(
                "session token must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Parses an `Authorization` header value of the form `Bearer <token>`.
    pub fn from_authorization_header(value: &str) -> AppResult<Self> {
        let (scheme, token) = value.trim().split_once(' ').ok_or_else(|| {
            AppError::Unauthorized("authorization header must use the bearer scheme".to_owned())
        })?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AppError::Unauthorized(format!(
                "unsupported authorization scheme '{scheme}'"
            )));
        }

        Self::new(token)
    }

    /// Returns the raw token for forwarding to the session's own back-end.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for SessionToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("SessionToken(<redacted>)")
    }
}
