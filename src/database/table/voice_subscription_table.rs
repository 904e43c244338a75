use async_trait::async_trait;
use sqlx::SqlitePool;

use super::BaseTable;
use super::Table;
use crate::database::error::DatabaseError;
use crate::database::model::VoiceSubscriptionModel;

pub struct VoiceSubscriptionTable {
    base: BaseTable,
}

impl VoiceSubscriptionTable {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Idempotent upsert. Re-inserting an existing (guild, user) pair is a
    /// successful no-op.
    pub async fn insert(&self, model: &VoiceSubscriptionModel) -> Result<(), DatabaseError> {
        sqlx::query("INSERT OR IGNORE INTO voice_subscriptions (guild_id, user_id) VALUES (?, ?)")
            .bind(&model.guild_id)
            .bind(&model.user_id)
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }

    /// Idempotent delete. Deleting a row that does not exist succeeds.
    pub async fn delete(&self, guild_id: &str, user_id: &str) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM voice_subscriptions WHERE guild_id = ? AND user_id = ?")
            .bind(guild_id)
            .bind(user_id)
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }

    pub async fn exists(&self, guild_id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM voice_subscriptions WHERE guild_id = ? AND user_id = ?",
        )
        .bind(guild_id)
        .bind(user_id)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn select_all_by_guild_id(
        &self,
        guild_id: &str,
    ) -> Result<Vec<VoiceSubscriptionModel>, DatabaseError> {
        let ret = sqlx::query_as::<_, VoiceSubscriptionModel>(
            "SELECT guild_id, user_id FROM voice_subscriptions WHERE guild_id = ?",
        )
        .bind(guild_id)
        .fetch_all(&self.base.pool)
        .await?;
        Ok(ret)
    }

    /// Cross-guild lookup by user, backed by the user_id index.
    pub async fn select_all_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<VoiceSubscriptionModel>, DatabaseError> {
        let ret = sqlx::query_as::<_, VoiceSubscriptionModel>(
            "SELECT guild_id, user_id FROM voice_subscriptions WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.base.pool)
        .await?;
        Ok(ret)
    }
}

#[async_trait]
impl Table<VoiceSubscriptionModel> for VoiceSubscriptionTable {
    async fn create_table(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS voice_subscriptions (
                guild_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                PRIMARY KEY (guild_id, user_id)
            )
            "#,
        )
        .execute(&self.base.pool)
        .await?;
        Ok(())
    }

    async fn drop_table(&self) -> Result<(), DatabaseError> {
        sqlx::query("DROP TABLE IF EXISTS voice_subscriptions")
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<VoiceSubscriptionModel>, DatabaseError> {
        let ret = sqlx::query_as::<_, VoiceSubscriptionModel>(
            "SELECT guild_id, user_id FROM voice_subscriptions",
        )
        .fetch_all(&self.base.pool)
        .await?;
        Ok(ret)
    }

    async fn delete_all(&self) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM voice_subscriptions")
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }
}
