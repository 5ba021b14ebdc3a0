use chrono::Utc;
use uuid::Uuid;

use ritmofit_auth_types::token::issue_access_token;
use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::user::Role;

use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::password::{MIN_PASSWORD_LEN, hash_password, verify_password};
use crate::usecase::otp::{consume_otp, issue_otp};

/// A signed access token and the account it belongs to.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub expires_at: u64,
    pub user: User,
}

fn open_session(user: User, secret: &str, ttl_secs: u64) -> Result<Session, ApiError> {
    let (token, expires_at) = issue_access_token(user.id, user.role, secret, ttl_secs)
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Session {
        token,
        expires_at,
        user,
    })
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidField("password"));
    }
    Ok(())
}

pub(crate) fn hash_secret(secret: &str) -> Result<String, ApiError> {
    hash_password(secret).map_err(|e| ApiError::Internal(anyhow::anyhow!("hash secret: {e}")))
}

fn verify_secret(secret: &str, hash: &str) -> Result<bool, ApiError> {
    verify_password(secret, hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("verify secret: {e}")))
}

/// Look up a non-deleted account by email.
async fn find_account<U: UserRepository>(users: &U, email: &str) -> Result<Option<User>, ApiError> {
    Ok(users
        .find_by_email(&normalize_email(email))
        .await?
        .filter(|u| !u.eliminado))
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub nombre: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

pub struct RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    /// Create an inactive socio account and send the confirmation code.
    ///
    /// Registering again with the email of an unconfirmed account replaces its
    /// details and sends a new code instead of failing with `EmailTaken`.
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        let nombre = input.nombre.trim().to_owned();
        let email = normalize_email(&input.email);
        let username = input.username.trim().to_owned();
        if nombre.is_empty() || email.is_empty() || username.is_empty() {
            return Err(ApiError::MissingData);
        }
        if !email.contains('@') {
            return Err(ApiError::InvalidField("email"));
        }
        validate_password(&input.password)?;

        // A registration that was never confirmed can be started over; it keeps
        // its id and gets the new details and a fresh code.
        let pending = match self.users.find_by_email(&email).await? {
            Some(existing) if existing.awaiting_verification() => Some(existing),
            Some(_) => return Err(ApiError::EmailTaken),
            None => None,
        };
        if let Some(other) = self.users.find_by_username(&username).await? {
            if pending.as_ref().is_none_or(|p| p.id != other.id) {
                return Err(ApiError::UsernameTaken);
            }
        }

        let now = Utc::now();
        let password_hash = hash_secret(&input.password)?;
        let user = match pending {
            Some(mut user) => {
                user.nombre = nombre;
                user.username = username;
                user.password_hash = password_hash;
                user.updated_at = now;
                self.users.update(&user).await?;
                tracing::info!(user_id = %user.id, "pending registration renewed");
                user
            }
            None => {
                let user = User {
                    id: Uuid::now_v7(),
                    nombre,
                    email,
                    username,
                    role: Role::Socio,
                    password_hash,
                    pin_hash: None,
                    activo: false,
                    verificado: false,
                    eliminado: false,
                    push_token: None,
                    created_at: now,
                    updated_at: now,
                };
                self.users.create(&user).await?;
                tracing::info!(user_id = %user.id, "user registered");
                user
            }
        };
        issue_otp(&self.otps, &self.mailer, &user, OtpPurpose::Register).await?;
        Ok(user)
    }
}

// ── Verify code (register / login) ───────────────────────────────────────────

pub struct VerifyCodeInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyRegisterUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otps: O,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository, O: OtpRepository> VerifyRegisterUseCase<U, O> {
    /// Confirm the registration code, activate the account and open a session.
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<Session, ApiError> {
        let mut user = find_account(&self.users, &input.email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        consume_otp(
            &self.otps,
            user.id,
            OtpPurpose::Register,
            &input.code,
            Utc::now(),
        )
        .await?;

        user.activo = true;
        user.verificado = true;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        open_session(user, &self.jwt_secret, self.token_ttl_secs)
    }
}

// ── Login (password, then emailed code) ──────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> LoginUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    /// Check the password and send a login code.
    pub async fn execute(&self, input: LoginInput) -> Result<(), ApiError> {
        let user = find_account(&self.users, &input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_secret(&input.password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }
        if !user.activo {
            return Err(ApiError::AccountNotVerified);
        }

        issue_otp(&self.otps, &self.mailer, &user, OtpPurpose::Login).await
    }
}

pub struct VerifyLoginUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otps: O,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository, O: OtpRepository> VerifyLoginUseCase<U, O> {
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<Session, ApiError> {
        let user = find_account(&self.users, &input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !user.activo {
            return Err(ApiError::AccountNotVerified);
        }

        consume_otp(&self.otps, user.id, OtpPurpose::Login, &input.code, Utc::now()).await?;

        tracing::info!(user_id = %user.id, "login");
        open_session(user, &self.jwt_secret, self.token_ttl_secs)
    }
}

// ── Login with PIN ───────────────────────────────────────────────────────────

pub struct PinLoginInput {
    pub email: String,
    pub pin: String,
}

pub struct PinLoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U: UserRepository> PinLoginUseCase<U> {
    pub async fn execute(&self, input: PinLoginInput) -> Result<Session, ApiError> {
        let user = find_account(&self.users, &input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !user.activo {
            return Err(ApiError::AccountNotVerified);
        }
        let pin_hash = user.pin_hash.as_deref().ok_or(ApiError::PinNotSet)?;
        if !verify_secret(&input.pin, pin_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "pin login");
        open_session(user, &self.jwt_secret, self.token_ttl_secs)
    }
}

// ── Password reset ───────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> ForgotPasswordUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: &str) -> Result<(), ApiError> {
        let user = find_account(&self.users, email)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        issue_otp(&self.otps, &self.mailer, &user, OtpPurpose::Reset).await
    }
}

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub password: String,
}

pub struct ResetPasswordUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otps: O,
}

impl<U: UserRepository, O: OtpRepository> ResetPasswordUseCase<U, O> {
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), ApiError> {
        validate_password(&input.password)?;
        let mut user = find_account(&self.users, &input.email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        consume_otp(&self.otps, user.id, OtpPurpose::Reset, &input.code, Utc::now()).await?;

        user.password_hash = hash_secret(&input.password)?;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }
}
