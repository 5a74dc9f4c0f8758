//! Account registration and login.
//!
//! Login exchanges credentials for an opaque bearer token from the codec; no
//! refresh or expiry. Registration stores the hashed password only.

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use quill_core::{
    password, Error, LoginRequest, LoginResponse, RegisterRequest, Result, TokenCodec, User,
    UserRepository,
};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenCodec>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenCodec>) -> Self {
        Self { users, tokens }
    }

    /// Register a new account. Emails are unique.
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        if req.name.trim().is_empty() {
            return Err(Error::InvalidInput("name must not be empty".to_string()));
        }
        if !EMAIL_RE.is_match(&req.email) {
            return Err(Error::InvalidInput(format!(
                "'{}' is not a valid email address",
                req.email
            )));
        }
        if req.password.is_empty() {
            return Err(Error::InvalidInput("password must not be empty".to_string()));
        }
        if self.users.get_by_email(&req.email).await?.is_some() {
            return Err(Error::Conflict("email already registered".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            email: req.email,
            password_hash: password::hash_password(&req.password),
            is_verified: false,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await?;
        info!(
            subsystem = "service",
            component = "user_service",
            op = "register",
            user_id = %user.id,
            "account registered"
        );
        Ok(user)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Wrong email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        let user = self
            .users
            .get_by_email(&req.email)
            .await?
            .ok_or_else(|| Error::Unauthorized("invalid credentials".to_string()))?;
        if !password::verify_password(&req.password, &user.password_hash) {
            return Err(Error::Unauthorized("invalid credentials".to_string()));
        }
        Ok(LoginResponse {
            token: self.tokens.encode(user.id),
            user_id: user.id,
        })
    }

    /// Resolve the account behind a token.
    pub async fn me(&self, token: &str) -> Result<User> {
        let user_id = self.tokens.decode(token)?;
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized("no user for token".to_string()))
    }
}
