use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub user_id: i64,
    pub job_id: i64,
    pub resume_path: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Application joined with its job title and applicant email.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApplicationDetail {
    pub id: i64,
    pub job_id: i64,
    pub job_title: String,
    pub user_id: i64,
    pub user_email: String,
    pub resume_path: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{ApplicationDetail, ApplicationStatus};

    #[test]
    fn detail_serializes_flat_summary() {
        let detail = ApplicationDetail {
            id: 4,
            job_id: 2,
            job_title: "Engineer".to_string(),
            user_id: 9,
            user_email: "jane@test.com".to_string(),
            resume_path: "/uploads/9_2_cv.pdf".to_string(),
            status: "pending".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["job_title"], "Engineer");
        assert_eq!(value["user_email"], "jane@test.com");
        assert_eq!(value["resume_path"], "/uploads/9_2_cv.pdf");
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn parses_known_statuses_case_insensitively() {
        assert_eq!(ApplicationStatus::parse("Reviewed"), Some(ApplicationStatus::Reviewed));
        assert_eq!(ApplicationStatus::parse(" hired "), Some(ApplicationStatus::Hired));
        assert_eq!(ApplicationStatus::parse("archived"), None);
    }
}
