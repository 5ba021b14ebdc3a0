use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use ritmofit_domain::otp::OtpPurpose;

use crate::domain::repository::{Mailer, OtpRepository};
use crate::domain::types::{OTP_LEN, OTP_MAX_ATTEMPTS, OTP_TTL_SECS, OtpCode, User};
use crate::error::ApiError;

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Store a fresh code for (`user`, `purpose`) and email it.
///
/// Replaces only the in-flight code of the same purpose. A failed email is
/// logged and not retried; the code stays valid.
pub async fn issue_otp<O, M>(
    otps: &O,
    mailer: &M,
    user: &User,
    purpose: OtpPurpose,
) -> Result<(), ApiError>
where
    O: OtpRepository,
    M: Mailer,
{
    let now = Utc::now();
    let otp = OtpCode {
        id: Uuid::now_v7(),
        user_id: user.id,
        purpose,
        code: generate_code(),
        expires_at: now + Duration::seconds(OTP_TTL_SECS),
        attempts: 0,
        created_at: now,
    };
    otps.upsert(&otp).await?;

    if let Err(e) = mailer.send_otp(&user.email, purpose, &otp.code).await {
        tracing::warn!(error = %format!("{e:#}"), user_id = %user.id, %purpose, "otp email not delivered");
    }
    Ok(())
}

/// Check `code` against the stored code for (`user_id`, `purpose`) and consume it.
///
/// The code is discarded after `OTP_MAX_ATTEMPTS` wrong guesses; a new one has
/// to be requested.
pub async fn consume_otp<O: OtpRepository>(
    otps: &O,
    user_id: Uuid,
    purpose: OtpPurpose,
    code: &str,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    let stored = otps
        .find(user_id, purpose)
        .await?
        .ok_or(ApiError::InvalidOtp)?;
    if !stored.accepts(purpose, code.trim(), now) {
        let attempts = otps.record_failed_attempt(user_id, purpose).await?;
        if attempts >= OTP_MAX_ATTEMPTS {
            otps.delete(user_id, purpose).await?;
            tracing::warn!(%user_id, %purpose, attempts, "otp discarded after repeated failures");
        }
        return Err(ApiError::InvalidOtp);
    }
    otps.delete(user_id, purpose).await
}
