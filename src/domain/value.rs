use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Root URL of an Everest platform API (e.g. `https://example.everst.io/api`).
///
/// Invariant: parses as an absolute `http`/`https` URL. Trailing slashes are
/// stripped so endpoints can be appended with a single `/`.
pub struct BaseUrl(String);

impl BaseUrl {
    /// Configuration key for the base URL (`base_url`).
    pub const FIELD: &'static str = "base_url";

    /// Create a validated [`BaseUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidBaseUrl {
            input: trimmed.to_owned(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }

        Ok(Self(trimmed.trim_end_matches('/').to_owned()))
    }

    /// Borrow the normalized URL (no trailing slash).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a relative endpoint onto the base URL.
    ///
    /// Leading slashes on `endpoint` are ignored, so `"/missions"` and
    /// `"missions"` address the same resource.
    pub fn join(&self, endpoint: &str) -> String {
        format!("{}/{}", self.0, endpoint.trim_start_matches('/'))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// OAuth client id exchanged for a bearer token.
///
/// Invariant: not blank. The value is kept exactly as given, surrounding
/// whitespace included, since `auth` sends it verbatim.
pub struct ClientId(String);

impl ClientId {
    /// Field name reported in validation errors.
    pub const FIELD: &'static str = "client_id";

    /// Create a validated [`ClientId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated client id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// OAuth client secret exchanged for a bearer token.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// `Debug` output never shows the value.
pub struct ClientSecret(String);

impl ClientSecret {
    /// Field name reported in validation errors.
    pub const FIELD: &'static str = "client_secret";

    /// Create a validated [`ClientSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unix timestamp in seconds, as used by mission dates.
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}
