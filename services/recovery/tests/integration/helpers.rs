use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use banter_recovery::domain::repository::{AccountPort, Mailer, ResetCodeRepository};
use banter_recovery::domain::types::{Account, RESET_CODE_TTL_SECS, ResetCode};
use banter_recovery::error::RecoveryServiceError;

// ── MockAccountPort ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAccountPort {
    pub accounts: Vec<Account>,
    pub password_updates: Arc<Mutex<Vec<(Uuid, String)>>>,
    pub fail_updates: bool,
}

impl MockAccountPort {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            password_updates: Arc::new(Mutex::new(vec![])),
            fail_updates: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn failing_updates(accounts: Vec<Account>) -> Self {
        Self {
            fail_updates: true,
            ..Self::new(accounts)
        }
    }

    /// Shared handle to the recorded password updates for post-execution
    /// inspection.
    pub fn updates_handle(&self) -> Arc<Mutex<Vec<(Uuid, String)>>> {
        Arc::clone(&self.password_updates)
    }
}

impl AccountPort for MockAccountPort {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RecoveryServiceError> {
        Ok(self.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn update_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), RecoveryServiceError> {
        if self.fail_updates {
            return Err(RecoveryServiceError::IdentityProvider(anyhow::anyhow!(
                "accounts service unavailable"
            )));
        }
        self.password_updates
            .lock()
            .unwrap()
            .push((account_id, new_password.to_owned()));
        Ok(())
    }
}

// ── MockResetCodeRepo ────────────────────────────────────────────────────────

/// In-memory repository with the same semantics as the database adapter:
/// most-recent-first lookup and an atomic conditional consume (one lock
/// covers the validity check and the write).
#[derive(Clone)]
pub struct MockResetCodeRepo {
    pub codes: Arc<Mutex<Vec<ResetCode>>>,
}

impl MockResetCodeRepo {
    pub fn new(codes: Vec<ResetCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn codes_handle(&self) -> Arc<Mutex<Vec<ResetCode>>> {
        Arc::clone(&self.codes)
    }
}

impl ResetCodeRepository for MockResetCodeRepo {
    async fn count_active(&self, identifier: &str) -> Result<u64, RecoveryServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.identifier == identifier && c.is_valid())
            .count() as u64)
    }

    async fn delete_oldest_active(
        &self,
        identifier: &str,
        n: u64,
    ) -> Result<(), RecoveryServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let mut live: Vec<_> = codes
            .iter()
            .filter(|c| c.identifier == identifier && c.is_valid())
            .map(|c| (c.created_at, c.id))
            .collect();
        live.sort();
        let doomed: Vec<Uuid> = live.into_iter().take(n as usize).map(|(_, id)| id).collect();
        codes.retain(|c| !doomed.contains(&c.id));
        Ok(())
    }

    async fn create(&self, code: &ResetCode) -> Result<(), RecoveryServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_valid(
        &self,
        identifier: &str,
        code: &str,
    ) -> Result<Option<ResetCode>, RecoveryServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.identifier == identifier && c.code == code && c.is_valid())
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, RecoveryServiceError> {
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id) {
            Some(c) if c.is_valid() => {
                c.consumed_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl Mailer for MockMailer {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), anyhow::Error> {
        if self.fail {
            return Err(anyhow::anyhow!("smtp relay unavailable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_account() -> Account {
    Account {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        email: "user@example.com".to_owned(),
    }
}

pub fn test_reset_code(identifier: &str) -> ResetCode {
    ResetCode {
        id: Uuid::new_v4(),
        identifier: identifier.to_owned(),
        code: "ABCD1234".to_owned(),
        expires_at: Utc::now() + Duration::seconds(RESET_CODE_TTL_SECS),
        consumed_at: None,
        created_at: Utc::now(),
    }
}

pub fn expired_reset_code(identifier: &str) -> ResetCode {
    ResetCode {
        expires_at: Utc::now() - Duration::seconds(1),
        created_at: Utc::now() - Duration::seconds(RESET_CODE_TTL_SECS + 1),
        ..test_reset_code(identifier)
    }
}

pub fn consumed_reset_code(identifier: &str) -> ResetCode {
    ResetCode {
        consumed_at: Some(Utc::now()),
        ..test_reset_code(identifier)
    }
}
