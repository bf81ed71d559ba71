use tonic::transport::Channel;
use uuid::Uuid;

use banter_proto::accounts::{
    GetAccountByEmailRequest, UpdatePasswordRequest, account_service_client::AccountServiceClient,
};

use crate::domain::repository::AccountPort;
use crate::domain::types::Account;
use crate::error::RecoveryServiceError;

#[derive(Clone)]
pub struct GrpcAccountPort {
    client: AccountServiceClient<Channel>,
}

impl GrpcAccountPort {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: AccountServiceClient::new(channel),
        }
    }
}

impl AccountPort for GrpcAccountPort {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RecoveryServiceError> {
        let response = self
            .client
            .clone()
            .get_account_by_email(GetAccountByEmailRequest {
                email: email.to_string(),
            })
            .await;
        match response {
            Ok(resp) => Ok(Some(resp.into_inner().try_into()?)),
            Err(status) if status.code() == tonic::Code::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!("gRPC get_account_by_email failed: {e}").into()),
        }
    }

    async fn update_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), RecoveryServiceError> {
        self.client
            .clone()
            .update_password(UpdatePasswordRequest {
                account_id: account_id.to_string(),
                new_password: new_password.to_string(),
            })
            .await
            .map_err(|e| {
                RecoveryServiceError::IdentityProvider(anyhow::anyhow!(
                    "gRPC update_password failed: {e}"
                ))
            })?;
        Ok(())
    }
}

impl TryFrom<banter_proto::accounts::Account> for Account {
    type Error = RecoveryServiceError;

    fn try_from(account: banter_proto::accounts::Account) -> Result<Self, Self::Error> {
        let id = account
            .id
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid UUID from accounts service"))?;
        Ok(Account {
            id,
            email: account.email,
        })
    }
}
