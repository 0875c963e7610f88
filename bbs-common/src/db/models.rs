//! Database models

use serde::{Deserialize, Serialize};

/// One row of the `storage` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: chrono::NaiveDateTime,
}
