//! Login accounts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Id, ParseLabelError};

/// Portal a user account belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "pasien")]
    Patient,
    #[serde(rename = "dokter")]
    Doctor,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Stored label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "pasien",
            Role::Doctor => "dokter",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pasien" | "patient" => Ok(Role::Patient),
            "dokter" | "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseLabelError::new("role", s)),
        }
    }
}

/// A login account.
///
/// Only one of `patient_id` / `doctor_id` is meaningful, depending on `role`.
/// Passwords are stored and compared in plain text; the login check is a
/// capability gate, not a trust boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(rename = "pasien_id", default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Id>,
    #[serde(rename = "dokter_id", default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<Id>,
}

impl User {
    /// Case-insensitive username comparison used for duplicate checks.
    pub fn username_eq_ignore_case(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }
}

/// Data for a new user account (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub patient_id: Option<Id>,
    pub doctor_id: Option<Id>,
}

impl NewUser {
    /// Account for a patient portal login.
    pub fn patient(username: String, password: String, patient_id: Id) -> Self {
        Self {
            username,
            password,
            role: Role::Patient,
            patient_id: Some(patient_id),
            doctor_id: None,
        }
    }

    /// Account for a doctor portal login.
    pub fn doctor(username: String, password: String, doctor_id: Id) -> Self {
        Self {
            username,
            password,
            role: Role::Doctor,
            patient_id: None,
            doctor_id: Some(doctor_id),
        }
    }

    /// Admin / cashier account.
    pub fn admin(username: String, password: String) -> Self {
        Self {
            username,
            password,
            role: Role::Admin,
            patient_id: None,
            doctor_id: None,
        }
    }
}

/// Partial update for a user account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    /// Shallow-merge the set fields over `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
    }
}

/// Username / password pair supplied when provisioning an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Patient.as_str(), "pasien");
        assert_eq!("dokter".parse::<Role>().unwrap(), Role::Doctor);
        assert_eq!("Doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_json_layout() {
        let user = User {
            id: 4,
            username: "dokter1".into(),
            password: "123".into(),
            role: Role::Doctor,
            patient_id: None,
            doctor_id: Some(1),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "dokter");
        assert_eq!(json["dokter_id"], 1);
        assert!(json.get("pasien_id").is_none());
    }

    #[test]
    fn test_username_eq_ignore_case() {
        let user = User {
            id: 1,
            username: "budi".into(),
            password: "123".into(),
            role: Role::Patient,
            patient_id: Some(3),
            doctor_id: None,
        };
        assert!(user.username_eq_ignore_case("BUDI"));
        assert!(!user.username_eq_ignore_case("budi2"));
    }
}
