//! Login payloads and the authenticated user.

use serde::{Deserialize, Serialize};

/// Username/password pair posted to a login endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Plain-text password (sent over the configured transport only).
    pub password: String,
}

/// Staff details nested in some user records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Staff {
    /// Staff role.
    #[serde(rename = "type", default)]
    pub staff_type: Option<String>,
}

/// Logged-in user as returned by the login endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// Account name.
    #[serde(default)]
    pub username: Option<String>,
    /// Account type (`admin` for administrators).
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    /// Nested staff record, if any.
    #[serde(default)]
    pub staff: Option<Staff>,
}

impl User {
    /// Effective role: the staff type when present, otherwise the account type.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.staff
            .as_ref()
            .and_then(|s| s.staff_type.as_deref())
            .or(self.user_type.as_deref())
    }
}

/// Response of the login endpoints.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub(crate) super_admin: Option<User>,
    #[serde(default)]
    pub(crate) api_key: Option<String>,
}
