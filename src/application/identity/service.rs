//! Identity service — authentication and user management.
//!
//! All identity business logic lives here; HTTP handlers are thin
//! wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    authorize, Action, Actor, DomainError, DomainResult, NewUser, User, UserChanges, UserFilter,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{issue_token, verify_token, JwtConfig, TokenKind};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

/// Credentials returned after a successful login.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Registration input, validated here before any write.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Option<UserRole>,
}

/// Account update input. Profile fields are admin-or-self; `role` and
/// `is_active` are admin-only.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Identity service, generic over the user repository so it stays
/// decoupled from the concrete persistence layer.
pub struct IdentityService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepositoryInterface> IdentityService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username or email + password; returns an access
    /// token (short-lived) and a refresh token (long-lived).
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthTokens> {
        let user = match self.repo.get_user_by_username(username_or_email).await? {
            Some(user) => Some(user),
            None => self.repo.get_user_by_email(username_or_email).await?,
        };

        let Some(user) = user else {
            return Err(DomainError::Unauthenticated("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthenticated("Invalid credentials".into()));
        }

        if !user.is_active {
            return Err(DomainError::Forbidden("Account is disabled".into()));
        }

        if let Err(e) = self.repo.touch_last_login(user.id).await {
            warn!(user_id = user.id, "Failed to stamp last login: {}", e);
        }

        let access_token = self.issue(&user, TokenKind::Access)?;
        let refresh_token = self.issue(&user, TokenKind::Refresh)?;

        info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.access_token_hours * 3600,
            user,
        })
    }

    /// Re-issue an access token from a valid refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<String> {
        let claims = verify_token(refresh_token, TokenKind::Refresh, &self.jwt_config)
            .map_err(|e| DomainError::Unauthenticated(e.to_string()))?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| DomainError::Unauthenticated("Invalid token subject".into()))?;

        let user = self
            .repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("Unknown account".into()))?;

        if !user.is_active {
            return Err(DomainError::Forbidden("Account is disabled".into()));
        }

        self.issue(&user, TokenKind::Access)
    }

    fn issue(&self, user: &User, kind: TokenKind) -> DomainResult<String> {
        issue_token(
            user.id,
            &user.username,
            user.role.as_str(),
            kind,
            &self.jwt_config,
        )
        .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account (default role: operator).
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        if input.username.len() < 3 || input.username.len() > 50 {
            return Err(DomainError::InvalidInput(
                "Username must be 3-50 characters".into(),
            ));
        }
        if input.password.len() < 8 {
            return Err(DomainError::InvalidInput(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !input.email.contains('@') {
            return Err(DomainError::InvalidInput("Invalid email address".into()));
        }
        if input.full_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Full name is required".into()));
        }

        if self
            .repo
            .get_user_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if self.repo.get_user_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                full_name: input.full_name,
                role: input.role.unwrap_or_default(),
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, filter: UserFilter) -> DomainResult<PaginatedResult<User>> {
        self.repo.list_users(filter).await
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Update an account. Role and active-flag changes are gated
    /// separately from profile changes.
    pub async fn update_user(
        &self,
        actor: &Actor,
        id: i32,
        patch: AccountPatch,
    ) -> DomainResult<User> {
        if patch.role.is_some() || patch.is_active.is_some() {
            authorize(actor, Action::UpdateUserAccount, None)?;
        }
        if patch.full_name.is_some() || patch.email.is_some() || patch.password.is_some() {
            authorize(actor, Action::UpdateUserProfile, Some(id))?;
        }

        let existing = self.get_user(id).await?;

        if let Some(ref email) = patch.email {
            if *email != existing.email
                && self.repo.get_user_by_email(email).await?.is_some()
            {
                return Err(DomainError::Conflict("Email already registered".into()));
            }
        }

        let password_hash = match patch.password {
            Some(ref password) if !password.is_empty() => {
                if password.len() < 8 {
                    return Err(DomainError::InvalidInput(
                        "Password must be at least 8 characters".into(),
                    ));
                }
                Some(hash_password(password).map_err(|e| {
                    DomainError::Internal(format!("Failed to hash password: {}", e))
                })?)
            }
            _ => None,
        };

        let updated = self
            .repo
            .update_user(
                id,
                UserChanges {
                    full_name: patch.full_name,
                    email: patch.email,
                    role: patch.role,
                    is_active: patch.is_active,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        Ok(updated)
    }

    /// Soft-delete an account by flipping its active flag. Accounts are
    /// never hard-deleted.
    pub async fn deactivate_user(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        authorize(actor, Action::UpdateUserAccount, None)?;

        self.repo
            .update_user(
                id,
                UserChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = id, "User deactivated");
        Ok(())
    }

    /// Change the caller's own password; verifies the current one first.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < 8 {
            return Err(DomainError::InvalidInput(
                "New password must be at least 8 characters".into(),
            ));
        }

        let user = self.get_user(user_id).await?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthenticated(
                "Invalid current password".into(),
            ));
        }

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        self.repo
            .update_user(
                user_id,
                UserChanges {
                    password_hash: Some(new_hash),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }
}
