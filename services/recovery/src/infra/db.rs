use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use banter_recovery_schema::reset_codes;

use crate::domain::repository::ResetCodeRepository;
use crate::domain::types::ResetCode;
use crate::error::RecoveryServiceError;

#[derive(Clone)]
pub struct DbResetCodeRepository {
    pub db: DatabaseConnection,
}

impl ResetCodeRepository for DbResetCodeRepository {
    async fn count_active(&self, identifier: &str) -> Result<u64, RecoveryServiceError> {
        let now = Utc::now();
        let count = reset_codes::Entity::find()
            .filter(reset_codes::Column::Identifier.eq(identifier))
            .filter(reset_codes::Column::ConsumedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .count(&self.db)
            .await
            .context("count active reset codes")
            .map_err(RecoveryServiceError::StorageUnavailable)?;
        Ok(count)
    }

    async fn delete_oldest_active(
        &self,
        identifier: &str,
        n: u64,
    ) -> Result<(), RecoveryServiceError> {
        let now = Utc::now();
        let oldest: Vec<Uuid> = reset_codes::Entity::find()
            .select_only()
            .column(reset_codes::Column::Id)
            .filter(reset_codes::Column::Identifier.eq(identifier))
            .filter(reset_codes::Column::ConsumedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .order_by(reset_codes::Column::CreatedAt, Order::Asc)
            .limit(n)
            .into_tuple()
            .all(&self.db)
            .await
            .context("find oldest active reset codes")
            .map_err(RecoveryServiceError::StorageUnavailable)?;

        reset_codes::Entity::delete_many()
            .filter(reset_codes::Column::Id.is_in(oldest))
            .exec(&self.db)
            .await
            .context("delete oldest active reset codes")
            .map_err(RecoveryServiceError::StorageUnavailable)?;
        Ok(())
    }

    async fn create(&self, code: &ResetCode) -> Result<(), RecoveryServiceError> {
        reset_codes::ActiveModel {
            id: Set(code.id),
            identifier: Set(code.identifier.clone()),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            consumed_at: Set(None),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create reset code")
        .map_err(RecoveryServiceError::StorageUnavailable)?;
        Ok(())
    }

    async fn find_valid(
        &self,
        identifier: &str,
        code: &str,
    ) -> Result<Option<ResetCode>, RecoveryServiceError> {
        let now = Utc::now();
        let model = reset_codes::Entity::find()
            .filter(reset_codes::Column::Identifier.eq(identifier))
            .filter(reset_codes::Column::Code.eq(code))
            .filter(reset_codes::Column::ConsumedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            // Codes may coexist per identifier; the most recent one wins.
            .order_by(reset_codes::Column::CreatedAt, Order::Desc)
            .one(&self.db)
            .await
            .context("find valid reset code")
            .map_err(RecoveryServiceError::StorageUnavailable)?;
        Ok(model.map(reset_code_from_model))
    }

    async fn consume(&self, id: Uuid) -> Result<bool, RecoveryServiceError> {
        let now = Utc::now();
        // Conditional update: the validity re-check and the write are one
        // statement, so concurrent consumers cannot both see rows_affected == 1.
        let result = reset_codes::Entity::update_many()
            .col_expr(reset_codes::Column::ConsumedAt, Expr::value(Some(now)))
            .filter(reset_codes::Column::Id.eq(id))
            .filter(reset_codes::Column::ConsumedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("consume reset code")
            .map_err(RecoveryServiceError::StorageUnavailable)?;
        Ok(result.rows_affected == 1)
    }
}

fn reset_code_from_model(model: reset_codes::Model) -> ResetCode {
    ResetCode {
        id: model.id,
        identifier: model.identifier,
        code: model.code,
        expires_at: model.expires_at,
        consumed_at: model.consumed_at,
        created_at: model.created_at,
    }
}
