use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::SessionError,
    model::session::SessionToken,
    store::{SESSION_KEY, Storage},
};

/// Gatekeeper for the protected views. There are no credentials, signing in
/// only records who is using the tool.
pub struct SessionService {
    store: Arc<dyn Storage>,
}

impl SessionService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub fn sign_in(&self, email: &str, now: NaiveDateTime) -> Result<SessionToken, SessionError> {
        let token = SessionToken {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            signed_in_at: now,
        };

        self.store.set(SESSION_KEY, &serde_json::to_string(&token)?)?;

        info!(email = %token.email, "Signed in");
        Ok(token)
    }

    /// Idempotent.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY)?;
        info!("Signed out");
        Ok(())
    }

    /// The active session, if any. An unreadable session counts as none.
    pub fn current(&self) -> Result<Option<SessionToken>, SessionError> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                Ok(None)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }

    /// The capability check a view performs before rendering.
    pub fn require(&self) -> Result<SessionToken, SessionError> {
        self.current()?.ok_or(SessionError::NotAuthenticated)
    }
}
