//! Store configuration and logging setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "Hospital Admin";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collection names, without the key prefix.
pub const USERS: &str = "users";
pub const PATIENTS: &str = "pasien";
pub const DOCTORS: &str = "dokter";
pub const REGISTRATIONS: &str = "pendaftaran";
pub const MEDICAL_RECORDS: &str = "rekam_medis";
pub const TRANSACTIONS: &str = "transaksi";
pub const LINE_ITEMS: &str = "detail_obat";

/// All collection names in seeding order.
pub const COLLECTIONS: [&str; 7] = [
    USERS,
    PATIENTS,
    DOCTORS,
    REGISTRATIONS,
    MEDICAL_RECORDS,
    TRANSACTIONS,
    LINE_ITEMS,
];

/// Layout and defaults of a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prepended to every collection name to form its storage key
    pub key_prefix: String,
    /// Storage key of the persisted session marker (not prefixed)
    pub session_key: String,
    /// Password given to provisioned doctor accounts when none is supplied
    pub default_doctor_password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: "rs_".to_string(),
            session_key: "currentUser".to_string(),
            default_doctor_password: "123".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Storage key for a collection.
    pub fn key(&self, collection: &str) -> String {
        format!("{}{}", self.key_prefix, collection)
    }
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "hospital_admin_core=info"
}

/// Install a fmt subscriber honouring `RUST_LOG`. Safe to call more than once.
///
/// Returns `false` when a global subscriber was already set.
pub fn init_logging() -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(app = APP_NAME, version = APP_VERSION, "Logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = StoreConfig::default();
        assert_eq!(config.key(PATIENTS), "rs_pasien");
        assert_eq!(config.key(LINE_ITEMS), "rs_detail_obat");
        assert_eq!(config.session_key, "currentUser");
    }

    #[test]
    fn test_from_json_partial() {
        let config = StoreConfig::from_json(r#"{"key_prefix": "clinic_"}"#).unwrap();
        assert_eq!(config.key(USERS), "clinic_users");
        assert_eq!(config.default_doctor_password, "123");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        assert!(!init_logging());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
