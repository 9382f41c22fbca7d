//! Logged-in session, persisted so a restart can restore it.

use serde::{Deserialize, Serialize};

use super::{Id, Role, User};

/// The current login, one variant per portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Session {
    #[serde(rename = "pasien")]
    Patient {
        #[serde(rename = "id")]
        user_id: Id,
        username: String,
        #[serde(rename = "pasien_id")]
        patient_id: Id,
    },
    #[serde(rename = "dokter")]
    Doctor {
        #[serde(rename = "id")]
        user_id: Id,
        username: String,
        #[serde(rename = "dokter_id")]
        doctor_id: Id,
    },
    #[serde(rename = "admin")]
    Admin {
        #[serde(rename = "id")]
        user_id: Id,
        username: String,
    },
}

impl Session {
    /// Build a session for `user`. Patient and doctor accounts without their
    /// linked record cannot open a session.
    pub fn from_user(user: &User) -> Option<Self> {
        match user.role {
            Role::Patient => user.patient_id.map(|patient_id| Session::Patient {
                user_id: user.id,
                username: user.username.clone(),
                patient_id,
            }),
            Role::Doctor => user.doctor_id.map(|doctor_id| Session::Doctor {
                user_id: user.id,
                username: user.username.clone(),
                doctor_id,
            }),
            Role::Admin => Some(Session::Admin {
                user_id: user.id,
                username: user.username.clone(),
            }),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Patient { .. } => Role::Patient,
            Session::Doctor { .. } => Role::Doctor,
            Session::Admin { .. } => Role::Admin,
        }
    }

    pub fn user_id(&self) -> Id {
        match self {
            Session::Patient { user_id, .. }
            | Session::Doctor { user_id, .. }
            | Session::Admin { user_id, .. } => *user_id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Session::Patient { username, .. }
            | Session::Doctor { username, .. }
            | Session::Admin { username, .. } => username,
        }
    }
}
