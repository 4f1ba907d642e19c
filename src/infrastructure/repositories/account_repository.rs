use crate::domain::account::Account;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

/// Lookup of marketplace account credentials.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, account_id: i64) -> AppResult<Option<Account>>;
}

pub struct PgAccountRepository {
    pool: Arc<DbPool>,
}

impl PgAccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, account_id: i64) -> AppResult<Option<Account>> {
        let pool = self.pool.as_ref();
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, partner_id, shop_id, partner_key, access_token
            FROM marketplace_accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }
}
