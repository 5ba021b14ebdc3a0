use chrono::Utc;
use uuid::Uuid;

use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::pagination::PageRequest;
use ritmofit_domain::user::Role;

use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::password::is_valid_pin;
use crate::usecase::auth::hash_secret;
use crate::usecase::otp::{consume_otp, issue_otp};

// ── UpdateMe ─────────────────────────────────────────────────────────────────

pub struct UpdateMeInput {
    pub nombre: Option<String>,
    pub username: Option<String>,
}

pub struct UpdateMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateMeUseCase<U> {
    pub async fn execute(&self, mut user: User, input: UpdateMeInput) -> Result<User, ApiError> {
        if let Some(nombre) = input.nombre {
            let nombre = nombre.trim();
            if nombre.is_empty() {
                return Err(ApiError::InvalidField("nombre"));
            }
            user.nombre = nombre.to_owned();
        }
        if let Some(username) = input.username {
            let username = username.trim();
            if username.is_empty() {
                return Err(ApiError::InvalidField("username"));
            }
            if username != user.username {
                if let Some(other) = self.users.find_by_username(username).await? {
                    if other.id != user.id {
                        return Err(ApiError::UsernameTaken);
                    }
                }
                user.username = username.to_owned();
            }
        }
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(user)
    }
}

// ── SetPin ───────────────────────────────────────────────────────────────────

pub struct SetPinUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPinUseCase<U> {
    pub async fn execute(&self, mut user: User, pin: &str) -> Result<(), ApiError> {
        if !is_valid_pin(pin) {
            return Err(ApiError::InvalidField("pin"));
        }
        user.pin_hash = Some(hash_secret(pin)?);
        user.updated_at = Utc::now();
        self.users.update(&user).await
    }
}

// ── SetPushToken ─────────────────────────────────────────────────────────────

pub struct SetPushTokenUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPushTokenUseCase<U> {
    /// `None` or a blank token unregisters the device.
    pub async fn execute(&self, mut user: User, push_token: Option<String>) -> Result<(), ApiError> {
        user.push_token = push_token
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());
        user.updated_at = Utc::now();
        self.users.update(&user).await
    }
}

// ── Account deletion ─────────────────────────────────────────────────────────

pub struct RequestDeletionUseCase<O: OtpRepository, M: Mailer> {
    pub otps: O,
    pub mailer: M,
}

impl<O: OtpRepository, M: Mailer> RequestDeletionUseCase<O, M> {
    pub async fn execute(&self, user: &User) -> Result<(), ApiError> {
        issue_otp(&self.otps, &self.mailer, user, OtpPurpose::Delete).await
    }
}

pub struct ConfirmDeletionUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otps: O,
}

impl<U: UserRepository, O: OtpRepository> ConfirmDeletionUseCase<U, O> {
    /// Soft-delete the account. Existing tokens stop working immediately.
    pub async fn execute(&self, mut user: User, code: &str) -> Result<(), ApiError> {
        consume_otp(&self.otps, user.id, OtpPurpose::Delete, code, Utc::now()).await?;

        user.eliminado = true;
        user.push_token = None;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "account deleted");
        Ok(())
    }
}

// ── Admin ────────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        self.users.list(page.clamped()).await
    }
}

pub struct SetRoleUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetRoleUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, role: Role) -> Result<User, ApiError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        user.role = role;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, role = %role, "role changed");
        Ok(user)
    }
}

pub struct SetActiveUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetActiveUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, activo: bool) -> Result<User, ApiError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        user.activo = activo;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, activo, "account activation changed");
        Ok(user)
    }
}
