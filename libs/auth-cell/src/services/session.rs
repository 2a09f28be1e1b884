use tracing::{debug, info};

use shared_models::auth::User;
use shared_models::context::{Role, UserContext};
use shared_session::AppState;
use shared_utils::jwt::create_token;

use crate::models::{AuthError, LoginResponse};

pub fn parse_role(input: &str) -> Result<Role, AuthError> {
    match input.trim().to_ascii_lowercase().as_str() {
        "patient" => Ok(Role::Patient),
        "agent" => Ok(Role::Agent),
        _ => Err(AuthError::UnknownRole { role: input.to_string() }),
    }
}

/// Demo sign-in: each login opens a fresh session for the fixed context of
/// the chosen role.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn login(&self, role: Role) -> Result<LoginResponse, AuthError> {
        let context = UserContext::for_role(role);
        let (session_id, handle) = self.state.sessions.open(context.clone()).await;
        let expires_at = handle.lock().await.expires_at;

        let user = User {
            id: context.id.clone(),
            name: context.name.clone(),
            role,
            session_id,
        };

        let ttl_hours = self.state.config.session_ttl_hours;
        let token = match create_token(&user, &self.state.config.jwt_secret, ttl_hours) {
            Ok(token) => token,
            Err(e) => {
                self.state.sessions.close(&session_id).await;
                return Err(AuthError::Token(e));
            }
        };

        info!("{} signed in as {}", user.name, role);

        Ok(LoginResponse {
            token,
            expires_at,
            user,
            context,
        })
    }

    /// Drops the session along with its history and schedule.
    pub async fn logout(&self, user: &User) -> bool {
        let closed = self.state.sessions.close(&user.session_id).await;
        debug!("{} signed out (session closed: {})", user.id, closed);
        closed
    }

    pub async fn switch_role(&self, user: &User, role: Role) -> Result<LoginResponse, AuthError> {
        self.logout(user).await;
        self.login(role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("patient").unwrap(), Role::Patient);
        assert_eq!(parse_role(" Agent ").unwrap(), Role::Agent);
        assert_matches!(parse_role("doctor"), Err(AuthError::UnknownRole { .. }));
    }
}
