pub mod voice_subscription_table;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::database::error::DatabaseError;

pub use voice_subscription_table::VoiceSubscriptionTable;

pub struct BaseTable {
    pub pool: SqlitePool,
}

impl BaseTable {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Whole-table operations shared by every table struct. Keyed lookups are
/// inherent methods on the concrete table since key shapes differ.
#[async_trait]
pub trait Table<T> {
    async fn create_table(&self) -> Result<(), DatabaseError>;
    async fn drop_table(&self) -> Result<(), DatabaseError>;
    async fn select_all(&self) -> Result<Vec<T>, DatabaseError>;
    async fn delete_all(&self) -> Result<(), DatabaseError>;
}
