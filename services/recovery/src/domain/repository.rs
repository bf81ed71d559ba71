#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Account, ResetCode};
use crate::error::RecoveryServiceError;

/// Port for resolving accounts and pushing credential changes to the
/// accounts service. Recovery never stores credentials itself.
pub trait AccountPort: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RecoveryServiceError>;

    /// Replace the account's password. Failures map to the
    /// `IdentityProvider` error kind.
    async fn update_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), RecoveryServiceError>;
}

/// Repository for password-reset codes.
pub trait ResetCodeRepository: Send + Sync {
    /// Count live (unconsumed and unexpired) codes for an identifier.
    async fn count_active(&self, identifier: &str) -> Result<u64, RecoveryServiceError>;

    /// Delete the `n` oldest live codes for an identifier.
    async fn delete_oldest_active(
        &self,
        identifier: &str,
        n: u64,
    ) -> Result<(), RecoveryServiceError>;

    /// Insert a new reset code.
    async fn create(&self, code: &ResetCode) -> Result<(), RecoveryServiceError>;

    /// Find the most recent live code matching identifier + code string.
    async fn find_valid(
        &self,
        identifier: &str,
        code: &str,
    ) -> Result<Option<ResetCode>, RecoveryServiceError>;

    /// Set `consumed_at = now` iff the row is still unconsumed and unexpired.
    /// Returns `false` if the row was already consumed, expired, or gone —
    /// of two racing consumers, exactly one sees `true`.
    async fn consume(&self, id: Uuid) -> Result<bool, RecoveryServiceError>;
}

/// Delivery channel for issued codes. Fire-and-forget from the caller's
/// perspective: issuance never fails because delivery did.
pub trait Mailer: Send + Sync {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), anyhow::Error>;
}
