//! Login.

use folio_config::LoginRole;
use tracing::{info, warn};

use super::HttpContentApi;
use crate::error::ApiError;
use crate::session::Session;
use crate::types::{Credentials, LoginResponse};

/// Login endpoint for a role.
pub(crate) fn login_path(role: LoginRole) -> &'static str {
    match role {
        LoginRole::Admin => "/super-admin/login",
        LoginRole::Reader => "/reader/login",
    }
}

/// Build a session from a login response.
///
/// The admin console only admits accounts whose type is `admin`.
pub(crate) fn session_from_response(
    role: LoginRole,
    response: LoginResponse,
) -> Result<Session, ApiError> {
    let user = response
        .super_admin
        .ok_or_else(|| ApiError::Login("response has no user".to_owned()))?;
    let api_key = response
        .api_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::Login("response has no API key".to_owned()))?;

    if role == LoginRole::Admin && user.user_type.as_deref() != Some("admin") {
        warn!(user_type = ?user.user_type, "Rejected non-admin account");
        return Err(ApiError::Login("unexpected user type".to_owned()));
    }

    Ok(Session::new(user, api_key))
}

impl HttpContentApi {
    pub(crate) fn post_login(
        &self,
        role: LoginRole,
        credentials: &Credentials,
    ) -> Result<Session, ApiError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(ApiError::Login("username and password are required".to_owned()));
        }
        info!("Logging in as '{}'", credentials.username);
        let response: LoginResponse = self.post_json_public(login_path(role), credentials)?;
        session_from_response(role, response)
    }
}
