use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Education {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub year: String,
    pub grade: Option<String>,
}
