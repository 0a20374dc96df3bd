//! Credential hashing and signed session tokens.
//!
//! Passwords are stored as bcrypt hashes, salted per account, with a
//! configurable work factor. A session token is `{account}.{role}.{expires}.{signature}`, where
//! the signature is an HMAC-SHA256 of the first three fields under the server's
//! session secret, hex encoded.
use crate::model::{AccountId, Role};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// bcrypt work factor used unless configured otherwise.
pub const DEFAULT_PASSWORD_COST: u32 = 10;
/// Lowest work factor bcrypt accepts.
pub const MIN_PASSWORD_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_PASSWORD_COST: u32 = 31;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Missing session token")]
    MissingToken,
    #[error("Malformed session token")]
    MalformedToken,
    #[error("Invalid session signature")]
    BadSignature,
    #[error("Session expired")]
    Expired,
    #[error("Invalid signing key")]
    InvalidKey,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

fn mac(key: &[u8], payload: &[u8]) -> Result<HmacSha256, AuthError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| AuthError::InvalidKey)?;
    mac.update(payload);
    Ok(mac)
}

/// A bcrypt password hash. Never serialized, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

impl PasswordHash {
    /// Hashes `password` at work factor `cost`. CPU bound; callers on the
    /// runtime should move it to a blocking thread.
    pub fn new(password: &str, cost: u32) -> Result<Self, AuthError> {
        bcrypt::hash(password, cost)
            .map(PasswordHash)
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }

    /// The work factor this hash was made with.
    pub fn cost(&self) -> Option<u32> {
        self.0.split('$').nth(2)?.parse().ok()
    }
}

/// The identity carried by a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub account_id: AccountId,
    pub role: Role,
    pub expires_at: i64,
}

/// Issues and checks session tokens under one secret.
#[derive(Clone)]
pub struct SessionIssuer {
    secret: Vec<u8>,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    pub fn issue(&self, account_id: AccountId, role: Role) -> Result<String, AuthError> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = Utc::now().timestamp().saturating_add(ttl);
        self.sign(account_id, role, expires_at)
    }

    fn sign(
        &self,
        account_id: AccountId,
        role: Role,
        expires_at: i64,
    ) -> Result<String, AuthError> {
        let payload = format!("{}.{}.{}", account_id.0, role, expires_at);
        let signature = hex::encode(mac(&self.secret, payload.as_bytes())?.finalize().into_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    pub fn verify(&self, token: &str) -> Result<Session, AuthError> {
        let (payload, signature) = token.rsplit_once('.').ok_or(AuthError::MalformedToken)?;
        let signature = hex::decode(signature).map_err(|_| AuthError::MalformedToken)?;
        mac(&self.secret, payload.as_bytes())?
            .verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let mut fields = payload.split('.');
        let (Some(id), Some(role), Some(expires_at), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(AuthError::MalformedToken);
        };
        let session = Session {
            account_id: AccountId(id.parse().map_err(|_| AuthError::MalformedToken)?),
            role: role.parse().map_err(|_| AuthError::MalformedToken)?,
            expires_at: expires_at.parse().map_err(|_| AuthError::MalformedToken)?,
        };
        if session.expires_at <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }
        Ok(session)
    }
}
