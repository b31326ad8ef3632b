use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::dto::{present, LoginRequest, RegisterRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::UserStore;
use crate::auth::repo_types::{NewUser, User};
use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

/// Letters and digits only, which also rules out spaces.
pub(crate) fn is_valid_username(username: &str) -> bool {
    username.chars().all(char::is_alphanumeric)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Validates, checks uniqueness (email first), hashes and stores a new user.
pub async fn register(users: &dyn UserStore, req: RegisterRequest) -> Result<User, AppError> {
    let username = present(req.username).ok_or_else(|| AppError::validation("Username is required"))?;
    let email = present(req.email).ok_or_else(|| AppError::validation("Email is required"))?;
    let password = present(req.password).ok_or_else(|| AppError::validation("Password is required"))?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::validation("Password must be at least 6 characters long"));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        warn!(%username, "username too short");
        return Err(AppError::validation("Username must be at least 3 characters long"));
    }
    if !is_valid_username(&username) {
        warn!(%username, "username not alphanumeric");
        return Err(AppError::validation("Username should be alphanumeric, also no spaces"));
    }

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::validation("Email is not valid"));
    }

    if users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::conflict("Email is taken"));
    }
    if users.find_by_username(&username).await?.is_some() {
        warn!(%username, "username already registered");
        return Err(AppError::conflict("Username is taken"));
    }

    let password_hash = hash_password(&password)?;
    let user = users
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Verifies credentials and issues an access/refresh pair bound to the user id.
pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<TokenPair, AppError> {
    let email = present(req.email).ok_or_else(|| AppError::validation("Email is required"))?;
    let password = present(req.password).ok_or_else(|| AppError::validation("Password is required"))?;
    let email = normalize_email(&email);

    let user = users.find_by_email(&email).await?.ok_or_else(|| {
        warn!(%email, "login unknown email");
        AppError::auth("User does not exist")
    })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::auth("Password is not correct"));
    }

    let pair = TokenPair {
        access: keys.sign_access(user.id)?,
        refresh: keys.sign_refresh(user.id)?,
    };
    info!(user_id = %user.id, "user logged in");
    Ok(pair)
}

/// Resolves the caller's own record; a token for a vanished user is rejected.
pub async fn identity(users: &dyn UserStore, caller: Uuid) -> Result<User, AppError> {
    users.find_by_id(caller).await?.ok_or_else(|| {
        warn!(user_id = %caller, "token for unknown user");
        AppError::auth("User does not exist")
    })
}

/// Mints a fresh access token. The refresh token itself is not rotated.
pub fn refresh(keys: &JwtKeys, caller: Uuid) -> Result<String, AppError> {
    let access = keys.sign_access(caller)?;
    info!(user_id = %caller, "access token refreshed");
    Ok(access)
}
