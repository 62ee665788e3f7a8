use sqlx::PgPool;

use crate::models::Referral;

pub async fn create(
    pool: &PgPool,
    job_id: i64,
    referrer_id: i64,
    referee_email: &str,
    message: &str,
) -> Result<Referral, sqlx::Error> {
    sqlx::query_as::<_, Referral>(
        "INSERT INTO referrals (job_id, referrer_id, referee_email, message)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(job_id)
    .bind(referrer_id)
    .bind(referee_email)
    .bind(message)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Referral>, sqlx::Error> {
    sqlx::query_as::<_, Referral>("SELECT * FROM referrals ORDER BY timestamp DESC, id DESC")
        .fetch_all(pool)
        .await
}
