//! Authentication and portal user service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{PortalUser, SessionClaims, SignupCount, SignupRequest, UserWithProfile},
    repository::Repository,
};

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));

/// Check the password rules. Returns every broken rule joined into one
/// message, or None when the password is acceptable.
pub fn validate_password(password: &str) -> Option<String> {
    let mut errors = Vec::new();

    if !LOWERCASE.is_match(password) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !UPPERCASE.is_match(password) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !SPECIAL.is_match(password) {
        errors.push("Password must contain at least one special character");
    }
    if password.chars().count() <= 8 {
        errors.push("Password must be more than 8 characters");
    }

    if errors.is_empty() {
        None
    } else {
        Some(errors.join(". "))
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new portal user and its profile
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<PortalUser> {
        let email = request.email.trim();
        let full_name = request.full_name.trim();

        if email.is_empty()
            || full_name.is_empty()
            || request.password.is_empty()
            || request.confirm_password.is_empty()
        {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        }

        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict(
                "Email already exists. Please use a different email.".to_string(),
            ));
        }

        if let Some(errors) = validate_password(&request.password) {
            return Err(AppError::Validation(errors));
        }

        if request.password != request.confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }

        let hash = self.hash_password(&request.password)?;
        let user = self.repository.users.create(email, &hash, full_name).await?;

        tracing::info!("New portal user {} registered", user.id);
        Ok(user)
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, PortalUser)> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("Please fill in all fields".to_string()));
        }

        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Account not exist".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid Password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::debug!("User {} signed in", user.id);
        Ok((token, user))
    }

    /// Acknowledge a password reset for an existing account. No mail is sent.
    pub async fn forgot_password(&self, email: &str) -> AppResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("Please enter your email address".to_string()));
        }

        if !self.repository.users.email_exists(email).await? {
            return Err(AppError::NotFound("Account not exist".to_string()));
        }

        Ok("Password reset link has been sent to your email address.".to_string())
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserWithProfile>> {
        self.repository.users.list_with_profiles().await
    }

    pub async fn signups_last_week(&self) -> AppResult<Vec<SignupCount>> {
        self.repository.users.signups_last_week().await
    }

    fn create_token_for_user(&self, user: &PortalUser) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.email.clone(),
            user_id: user.id,
            exp: now + (self.config.session_hours as i64) * 3600,
            iat: now,
        };

        claims
            .create_token(&self.config.session_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify_password(&self, user: &PortalUser, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_passes() {
        assert_eq!(validate_password("Secure#Pass1"), None);
    }

    #[test]
    fn test_each_rule_is_reported() {
        let errors = validate_password("short").unwrap();
        assert!(errors.contains("uppercase"));
        assert!(errors.contains("special character"));
        assert!(errors.contains("more than 8 characters"));
        assert!(!errors.contains("lowercase"));
    }

    #[test]
    fn test_exactly_eight_characters_is_too_short() {
        let errors = validate_password("Abcdef#1").unwrap();
        assert_eq!(errors, "Password must be more than 8 characters");
        assert_eq!(validate_password("Abcdefg#1"), None);
    }
}
