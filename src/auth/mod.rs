//! Admin session and display-only token decoding.
//!
//! The decoded claims are cosmetic: they pick the name and avatar shown in
//! the client. Whether a caller may do anything is decided by the backend.

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::SessionError;

pub const DEFAULT_DISPLAY_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@livease.com";

// base64url, padded or not
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The signed-in admin's bearer token and e-mail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    admin_email: Option<String>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>, admin_email: Option<String>) -> Self {
        Self {
            token: Some(token.into()),
            admin_email,
            signed_in_at: Some(Utc::now()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn admin_email(&self) -> Option<&str> {
        self.admin_email.as_deref()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        current_user(self)
    }

    /// Read a saved session; a missing file is an anonymous session
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        if !path.exists() {
            return Ok(Self::anonymous());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Forget token and e-mail together
    pub fn clear(path: &Path) -> Result<(), SessionError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Display identity derived from the token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub user_id: Option<String>,
    pub profile_pic: Option<String>,
    pub account_type: Option<String>,
}

/// Decode the payload segment of a JWT without checking signature or expiry.
///
/// Returns `None` for an empty token, a token that does not have exactly
/// three dot-separated segments, or a payload that is not base64url JSON.
pub fn decode_token(token: &str) -> Option<Value> {
    if token.is_empty() {
        return None;
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let bytes = match TOKEN_ENGINE.decode(parts[1]) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Token payload is not base64url: {}", e);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Token payload is not JSON: {}", e);
            None
        }
    }
}

/// Identity of the signed-in admin, if the session holds a decodable token
pub fn current_user(session: &Session) -> Option<Identity> {
    let claims = decode_token(session.token()?)?;
    let text = |key: &str| claims.get(key).and_then(Value::as_str).map(str::to_string);

    Some(Identity {
        name: text("user_name").unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        email: session
            .admin_email()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
        user_id: text("user_id"),
        profile_pic: text("profile_pic"),
        account_type: text("account_type"),
    })
}

/// Pull the bearer token out of a sign-in response
pub fn token_from_sign_in(response: &Value) -> Option<String> {
    let candidates = [
        response.get("token"),
        response.get("authToken"),
        response.get("data").and_then(|d| d.get("token")),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}
