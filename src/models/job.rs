use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use sqlx::types::Json;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Job {
    pub id: i64,
    pub company: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub tags: Json<Vec<String>>,
    #[serde(serialize_with = "serialize_posted_date")]
    pub date_posted: NaiveDate,
    pub admin_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Listing date in the `19 Oct, 2026` form the job board displays.
fn serialize_posted_date<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&date.format("%d %b, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use sqlx::types::Json;

    use super::Job;

    #[test]
    fn serializes_date_posted_for_display() {
        let job = Job {
            id: 1,
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            description: "Build things".to_string(),
            location: "Remote".to_string(),
            salary: "$1".to_string(),
            tags: Json(vec!["Rust".to_string()]),
            date_posted: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            admin_id: 7,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["date_posted"], "05 Mar, 2024");
        assert_eq!(value["tags"], serde_json::json!(["Rust"]));
    }
}
