use sea_orm::Database;
use tracing::info;

use banter_core::config::Config as _;
use banter_core::tracing::init_tracing;
use banter_recovery::config::RecoveryConfig;
use banter_recovery::infra::grpc::GrpcAccountPort;
use banter_recovery::infra::smtp::SmtpMailer;
use banter_recovery::router::build_router;
use banter_recovery::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecoveryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let accounts_channel = tonic::transport::Channel::from_shared(config.accounts_grpc_url.clone())
        .expect("invalid ACCOUNTS_GRPC_URL")
        .connect_lazy();

    let mailer = SmtpMailer::new(&config).expect("failed to build SMTP transport");

    let state = AppState {
        db,
        account_port: GrpcAccountPort::new(accounts_channel),
        mailer,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.recovery_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("recovery service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
