use sea_orm::DatabaseConnection;

use crate::infra::db::DbResetCodeRepository;
use crate::infra::grpc::GrpcAccountPort;
use crate::infra::smtp::SmtpMailer;

/// Shared application state passed to every handler via axum `State`.
///
/// Built once in `main`; the tonic channel inside `account_port` is the
/// single lazily connected client handle for the accounts service.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub account_port: GrpcAccountPort,
    pub mailer: SmtpMailer,
}

impl AppState {
    pub fn reset_code_repo(&self) -> DbResetCodeRepository {
        DbResetCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn account_port(&self) -> GrpcAccountPort {
        self.account_port.clone()
    }

    pub fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
    }
}
