use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{AccountPort, Mailer, ResetCodeRepository};
use crate::domain::types::{
    MAX_ACTIVE_RESET_CODES, MIN_PASSWORD_LEN, RESET_CODE_LEN, RESET_CODE_TTL_SECS, ResetCode,
};
use crate::error::RecoveryServiceError;

/// Charset for generating reset codes (uppercase alphanumeric, typeable
/// from an email).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..RESET_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── IssueResetCode ────────────────────────────────────────────────────────────

pub struct IssueResetCodeInput {
    pub email: String,
}

pub struct IssueResetCodeUseCase<A, R, M>
where
    A: AccountPort,
    R: ResetCodeRepository,
    M: Mailer,
{
    pub accounts: A,
    pub reset_codes: R,
    pub mailer: M,
}

impl<A, R, M> IssueResetCodeUseCase<A, R, M>
where
    A: AccountPort,
    R: ResetCodeRepository,
    M: Mailer,
{
    /// Issues a code for the identifier and hands it to the mailer.
    ///
    /// Succeeds whether or not the identifier maps to an account: revealing
    /// existence through this endpoint would let callers enumerate accounts.
    pub async fn execute(&self, input: IssueResetCodeInput) -> Result<(), RecoveryServiceError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(RecoveryServiceError::InvalidInput);
        }

        // Unknown identifiers get the same success as known ones; nothing
        // is stored and nothing is sent.
        let Some(account) = self.accounts.find_by_email(email).await? else {
            tracing::info!("reset code requested for unknown identifier, skipping issuance");
            return Ok(());
        };

        // Cap live codes per identifier. Rejecting here would leak that the
        // identifier has an account, so the oldest live codes are dropped
        // instead.
        let active = self.reset_codes.count_active(email).await?;
        if active >= MAX_ACTIVE_RESET_CODES {
            self.reset_codes
                .delete_oldest_active(email, active - MAX_ACTIVE_RESET_CODES + 1)
                .await?;
        }

        let code_str = generate_code();
        let now = Utc::now();
        let code = ResetCode {
            id: Uuid::new_v4(),
            identifier: email.to_owned(),
            code: code_str.clone(),
            expires_at: now + Duration::seconds(RESET_CODE_TTL_SECS),
            consumed_at: None,
            created_at: now,
        };
        self.reset_codes.create(&code).await?;

        // Fire-and-forget: the code is already stored, and the caller's
        // result must not depend on the mail relay.
        if let Err(e) = self.mailer.send_reset_code(&account.email, &code_str).await {
            tracing::warn!(error = %e, "reset code delivery failed");
        }

        Ok(())
    }
}

// ── CheckResetCode ────────────────────────────────────────────────────────────

pub struct CheckResetCodeInput {
    pub email: String,
    pub code: String,
}

pub struct CheckResetCodeUseCase<R>
where
    R: ResetCodeRepository,
{
    pub reset_codes: R,
}

impl<R> CheckResetCodeUseCase<R>
where
    R: ResetCodeRepository,
{
    /// Side-effect-free validity check; never consumes the code and may be
    /// called any number of times. Fails closed: malformed input, no match,
    /// expired, and consumed all look the same.
    pub async fn execute(&self, input: CheckResetCodeInput) -> Result<bool, RecoveryServiceError> {
        let email = input.email.trim();
        let code = input.code.trim();
        if email.is_empty() || code.is_empty() {
            return Ok(false);
        }

        let found = self.reset_codes.find_valid(email, code).await?;
        Ok(found.is_some())
    }
}

// ── ResetPassword ─────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<A, R>
where
    A: AccountPort,
    R: ResetCodeRepository,
{
    pub accounts: A,
    pub reset_codes: R,
}

impl<A, R> ResetPasswordUseCase<A, R>
where
    A: AccountPort,
    R: ResetCodeRepository,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), RecoveryServiceError> {
        let email = input.email.trim();
        let code = input.code.trim();
        if email.is_empty() || code.is_empty() || input.new_password.is_empty() {
            return Err(RecoveryServiceError::InvalidInput);
        }
        // Rejected before any lookup so a weak password never consumes the code.
        if input.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RecoveryServiceError::WeakPassword);
        }

        // An identifier without an account gets the same answer as a wrong
        // code.
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(RecoveryServiceError::InvalidOrExpiredCode)?;

        let reset_code = self
            .reset_codes
            .find_valid(email, code)
            .await?
            .ok_or(RecoveryServiceError::InvalidOrExpiredCode)?;

        // Conditional consume: of two racing resets on the same code, at
        // most one passes this point.
        if !self.reset_codes.consume(reset_code.id).await? {
            return Err(RecoveryServiceError::InvalidOrExpiredCode);
        }

        // If the accounts service fails past this point the code stays
        // consumed; the caller requests a new code rather than replaying
        // this one.
        self.accounts
            .update_password(account.id, &input.new_password)
            .await?;

        Ok(())
    }
}
