//! Authenticated user information

use serde::{Deserialize, Serialize};

/// Response of `GET /user/`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInformation {
    pub id: String,
    pub email: String,
    pub client_key: String,
    pub first_name: String,
    pub last_name: String,
    pub beta_user: bool,
    pub admin_user: bool,
    pub public_key: bool,
    pub package_life: i64,
    pub response: String,
}

impl UserInformation {
    /// "First Last", trimmed when either half is missing
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
