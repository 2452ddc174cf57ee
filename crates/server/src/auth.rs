//! Principal extraction.
//!
//! Identity is owned by an external provider. The server only needs a narrow
//! [`Authenticator`] that turns a bearer token into a [`Principal`]; handlers
//! that require a caller take `Principal` as an extractor, which rejects the
//! request with 401 before the handler body runs.
//!
//! ```text
//! Authorization: Bearer <token>
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;
use types::MemberId;

use crate::error::AppError;
use crate::state::ServerState;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Roster id of the caller.
    pub id: MemberId,
    pub email: String,
}

/// Resolves bearer tokens to principals.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `None` when the token is not recognized.
    async fn authenticate(&self, token: &str) -> Option<Principal>;
}

/// Fixed token table loaded from configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, Principal>,
}

/// Malformed `token=member_id:email` entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid auth token entry '{0}' (expected token=member_id:email)")]
pub struct InvalidTokenEntry(pub String);

impl StaticTokenAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }

    /// Parse entries of the form `token=member_id:email`.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, InvalidTokenEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut auth = Self::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            let parsed = entry.split_once('=').and_then(|(token, identity)| {
                let (id, email) = identity.split_once(':')?;
                let (token, id, email) = (token.trim(), id.trim(), email.trim());
                (!token.is_empty() && !id.is_empty()).then(|| {
                    (
                        token.to_string(),
                        Principal {
                            id: MemberId::new(id),
                            email: email.to_string(),
                        },
                    )
                })
            });
            let (token, principal) = parsed.ok_or_else(|| InvalidTokenEntry(entry.to_string()))?;
            auth.tokens.insert(token, principal);
        }
        Ok(auth)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Option<Principal> {
        self.tokens.get(token).cloned()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<ServerState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Unauthorized("authentication required: Authorization: Bearer <token>".into())
        })?;

        match state.authenticator.authenticate(token).await {
            Some(principal) => {
                debug!(member = %principal.id, "Authenticated request");
                Ok(principal)
            }
            None => Err(AppError::Unauthorized("invalid bearer token".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_parses_identity() {
        let auth =
            StaticTokenAuthenticator::from_entries(["t1=m1:ash@example.com", " t2 = m2 : "]).unwrap();
        assert_eq!(auth.len(), 2);
        assert_eq!(
            auth.tokens.get("t1"),
            Some(&Principal {
                id: MemberId::from("m1"),
                email: "ash@example.com".into(),
            })
        );
        assert_eq!(auth.tokens["t2"].email, "");
    }

    #[test]
    fn test_from_entries_rejects_malformed() {
        for bad in ["no-equals", "t=missing-colon", "=m1:x@y", "t=:x@y"] {
            let err = StaticTokenAuthenticator::from_entries([bad]).unwrap_err();
            assert_eq!(err, InvalidTokenEntry(bad.to_string()));
        }
    }

    #[tokio::test]
    async fn test_authenticate_lookup() {
        let auth = StaticTokenAuthenticator::new().with_token(
            "secret",
            Principal {
                id: MemberId::from("m1"),
                email: "a@b.c".into(),
            },
        );
        assert!(auth.authenticate("secret").await.is_some());
        assert!(auth.authenticate("other").await.is_none());
    }
}
