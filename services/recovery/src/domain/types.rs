use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account data fetched from the accounts service (only what recovery needs).
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
}

/// One password-reset code issued for an account identifier.
#[derive(Debug, Clone)]
pub struct ResetCode {
    pub id: Uuid,
    pub identifier: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ResetCode {
    /// Valid strictly before `expires_at`; a consumed code is never valid again.
    pub fn is_valid(&self) -> bool {
        self.consumed_at.is_none() && self.expires_at > Utc::now()
    }
}

/// Maximum number of live (unconsumed, unexpired) reset codes per identifier.
/// Issuing past the cap silently deletes the oldest live codes first.
pub const MAX_ACTIVE_RESET_CODES: u64 = 5;

/// Reset code length in characters.
pub const RESET_CODE_LEN: usize = 8;

/// Reset code time-to-live in seconds (15 minutes).
pub const RESET_CODE_TTL_SECS: i64 = 900;

/// Minimum accepted password length. Matches the legacy product behavior;
/// raising it is a one-constant change.
pub const MIN_PASSWORD_LEN: usize = 6;
