use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Experience {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: Option<String>,
}
