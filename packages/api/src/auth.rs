//! # Auth service wrapper
//!
//! Thin REST wrapper over the auth service: registration, login, profile
//! read/update and account deletion. Registration and profile updates are
//! validated locally first, so a bad form never issues a request.
//!
//! Login is a two-step flow: the credential exchange returns only a token,
//! so on success the wrapper stores the token and immediately fetches the
//! profile. If that follow-up fails, the login still stands with a deferred
//! profile; the auth provider retries the fetch on the next mount.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::models::{LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest, UserProfile};
use crate::session::SessionStore;

/// Minimum password length accepted by the auth service.
pub const MIN_PASSWORD_LEN: usize = 6;

/// REST wrapper over the auth service.
#[derive(Clone)]
pub struct AuthService {
    http: HttpClient,
    base_url: String,
}

impl AuthService {
    pub fn new(http: HttpClient, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.http.session()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create an account. Validates locally before issuing the request.
    pub async fn register(&self, payload: &RegisterRequest) -> ApiResult<UserProfile> {
        validate_registration(payload)?;
        self.http
            .post_json(&self.url("/auth/register"), payload, "Registration failed")
            .await
    }

    /// Exchange credentials for a token, store it, then fetch the profile.
    ///
    /// Returns the profile when the follow-up fetch succeeds, `None` when it
    /// fails (the session stays logged in with a deferred profile).
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Option<UserProfile>> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .http
            .post_json(&self.url("/auth/login"), &credentials, "Login failed")
            .await?;

        // The token must be in place before the profile fetch below.
        self.session().login(response.access_token, None);

        match self.current_user().await {
            Ok(user) => {
                self.session().set_user(user.clone());
                Ok(Some(user))
            }
            Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
            Err(err) => {
                tracing::warn!("profile fetch after login failed: {err}");
                Ok(None)
            }
        }
    }

    /// Fetch the current user's profile.
    pub async fn current_user(&self) -> ApiResult<UserProfile> {
        self.http
            .get_json(&self.url("/auth/me"), &[], "Failed to fetch profile")
            .await
    }

    /// Update profile fields; returns the server's updated representation
    /// and refreshes the session's cached profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        validate_profile_update(update)?;
        let user: UserProfile = self
            .http
            .put_json(&self.url("/auth/me"), update, "Failed to update profile")
            .await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Permanently delete the account, then clear the session.
    pub async fn delete_account(&self) -> ApiResult<()> {
        self.http
            .delete(&self.url("/auth/me"), "Failed to delete account")
            .await?;
        self.session().logout();
        Ok(())
    }
}

/// Local registration checks mirroring the auth service's own rules.
pub fn validate_registration(payload: &RegisterRequest) -> ApiResult<()> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(ApiError::validation("First and last name are required"));
    }
    let email = payload.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::validation("Please enter a valid email"));
    }
    if payload.phone.trim().is_empty() {
        return Err(ApiError::validation("Phone number is required"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if payload.password != payload.confirm_password {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(())
}

fn validate_profile_update(update: &ProfileUpdate) -> ApiResult<()> {
    if update.first_name.as_deref().is_some_and(|s| s.trim().is_empty())
        || update.last_name.as_deref().is_some_and(|s| s.trim().is_empty())
    {
        return Err(ApiError::validation("Name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> RegisterRequest {
        RegisterRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            profile_image: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert_eq!(validate_registration(&valid_payload()), Ok(()));
    }

    #[test]
    fn short_password_is_rejected_locally() {
        let mut payload = valid_payload();
        payload.password = "12345".to_string();
        payload.confirm_password = "12345".to_string();
        assert!(matches!(
            validate_registration(&payload),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn password_mismatch_is_rejected_locally() {
        let mut payload = valid_payload();
        payload.confirm_password = "different".to_string();
        assert_eq!(
            validate_registration(&payload),
            Err(ApiError::validation("Passwords do not match"))
        );
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut payload = valid_payload();
        payload.email = "not-an-email".to_string();
        assert!(validate_registration(&payload).is_err());
    }

    #[test]
    fn profile_update_rejects_blank_name() {
        let update = ProfileUpdate {
            first_name: Some("  ".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(validate_profile_update(&update).is_err());
        let update = ProfileUpdate {
            phone: Some("555-0101".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(validate_profile_update(&update).is_ok());
    }
}
