//! Back-office login and the session carried in the admin cookie.

use db::models::admin_user::AdminUser;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "admin-session";
/// Seven days.
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("session encoding failed: {0}")]
    Session(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Identity stored in the admin cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub user_id: Uuid,
    pub username: String,
}

impl AdminSession {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `None` for anything that is not a well-formed session.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

pub struct AuthService;

impl AuthService {
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(password, BCRYPT_COST)?)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(bcrypt::verify(password, hash)?)
    }

    pub async fn login(
        pool: &SqlitePool,
        request: &LoginRequest,
    ) -> Result<AdminSession, AuthError> {
        let (Some(username), Some(password)) = (
            request.username.as_deref().filter(|u| !u.is_empty()),
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AuthError::MissingCredentials);
        };

        let Some(admin) = AdminUser::find_by_username(pool, username).await? else {
            warn!(username, "Login attempt for unknown admin");
            return Err(AuthError::InvalidCredentials);
        };

        if !Self::verify_password(password, &admin.password)? {
            warn!(username, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %admin.id, username, "Admin logged in");
        Ok(AdminSession {
            user_id: admin.id,
            username: admin.username,
        })
    }
}
