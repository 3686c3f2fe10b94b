use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const DEFAULT_COMPANY_STATUS: &str = "active";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            status: DEFAULT_COMPANY_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }
}
