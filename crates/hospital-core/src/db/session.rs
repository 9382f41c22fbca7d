//! Login and the persisted session marker.

use thiserror::Error;

use super::{DbError, HospitalStore};
use crate::models::{Role, Session};

/// Login failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is a {actual} account, not {expected}")]
    WrongRole { expected: Role, actual: Role },

    #[error("Account {0} is not linked to a patient or doctor record")]
    UnlinkedAccount(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl HospitalStore {
    /// Authenticate on the portal for `role` and persist the session.
    pub fn login(&self, username: &str, password: &str, role: Role) -> Result<Session, AuthError> {
        let user = self
            .authenticate(username, password)?
            .ok_or(AuthError::InvalidCredentials)?;

        if user.role != role {
            return Err(AuthError::WrongRole {
                expected: role,
                actual: user.role,
            });
        }

        let session =
            Session::from_user(&user).ok_or_else(|| AuthError::UnlinkedAccount(user.username.clone()))?;
        self.save_session(&session)?;
        tracing::info!(user_id = user.id, role = %role, "Logged in");
        Ok(session)
    }

    /// Persist `session` as the current login.
    pub fn save_session(&self, session: &Session) -> Result<(), DbError> {
        let raw = serde_json::to_string(session).map_err(crate::storage::StorageError::from)?;
        self.backend.set(&self.config.session_key, &raw)?;
        Ok(())
    }

    /// Read back the persisted login, if any.
    ///
    /// A missing or unreadable marker yields `None`.
    pub fn restore_session(&self) -> Result<Option<Session>, DbError> {
        let Some(raw) = self.backend.get(&self.config.session_key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable session marker ignored");
                Ok(None)
            }
        }
    }

    /// Clear the persisted login.
    pub fn logout(&self) -> Result<(), DbError> {
        self.backend.remove(&self.config.session_key)?;
        Ok(())
    }
}
