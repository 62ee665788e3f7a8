use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Referral {
    pub id: i64,
    pub job_id: i64,
    pub referrer_id: i64,
    pub referee_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
