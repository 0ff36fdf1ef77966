//! JWT token handling: short-lived access tokens plus long-lived refresh
//! tokens. The two kinds carry a `kind` claim and are never
//! interchangeable.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Access token lifetime in hours
    pub access_token_hours: i64,
    /// Refresh token lifetime in days
    pub refresh_token_days: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "jwt-secret-key-change-in-production".to_string()),
            access_token_hours: 1,
            refresh_token_days: 30,
            issuer: "callmon".to_string(),
        }
    }
}

/// Which of the two token kinds a credential is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// User role
    pub role: String,
    /// "access" or "refresh"
    pub kind: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    fn new(user_id: i32, username: &str, role: &str, kind: TokenKind, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = match kind {
            TokenKind::Access => now + Duration::hours(config.access_token_hours),
            TokenKind::Refresh => now + Duration::days(config.refresh_token_days),
        };

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            kind: kind.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// The subject parsed back into a user id.
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Issue a token of the given kind for a user
pub fn issue_token(
    user_id: i32,
    username: &str,
    role: &str,
    kind: TokenKind,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, username, role, kind, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token and require it to be of the expected kind
pub fn verify_token(token: &str, kind: TokenKind, config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    if token_data.claims.kind != kind.as_str() {
        return Err(AuthError::WrongTokenKind);
    }

    Ok(token_data.claims)
}

/// Errors that can occur during authentication
#[derive(Debug, Clone)]
pub enum AuthError {
    /// Token is missing
    MissingToken,
    /// Token is invalid
    InvalidToken,
    /// Token has expired
    ExpiredToken,
    /// An access token was presented for refresh, or vice versa
    WrongTokenKind,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Missing authentication token"),
            Self::InvalidToken => write!(f, "Invalid authentication token"),
            Self::ExpiredToken => write!(f, "Token has expired"),
            Self::WrongTokenKind => write!(f, "Wrong token kind"),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_access_token() {
        let config = JwtConfig::default();
        let token = issue_token(42, "supervisor1", "supervisor", TokenKind::Access, &config)
            .unwrap();

        let claims = verify_token(&token, TokenKind::Access, &config).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.username, "supervisor1");
        assert_eq!(claims.role, "supervisor");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let config = JwtConfig::default();
        let refresh = issue_token(42, "supervisor1", "supervisor", TokenKind::Refresh, &config)
            .unwrap();

        let err = verify_token(&refresh, TokenKind::Access, &config).unwrap_err();
        assert!(matches!(err, AuthError::WrongTokenKind));

        // And the other direction.
        let access = issue_token(42, "supervisor1", "supervisor", TokenKind::Access, &config)
            .unwrap();
        let err = verify_token(&access, TokenKind::Refresh, &config).unwrap_err();
        assert!(matches!(err, AuthError::WrongTokenKind));
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::default();
        let result = verify_token("not-a-token", TokenKind::Access, &config);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
