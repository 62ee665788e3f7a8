use sqlx::PgPool;

use crate::models::{Role, User};

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub full_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub location: Option<&'a str>,
}

/// Profile fields a user may change; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub resume_headline: Option<String>,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user: &NewUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, is_admin, role, full_name, phone, location)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.role.is_admin())
    .bind(user.role.as_str())
    .bind(user.full_name)
    .bind(user.phone)
    .bind(user.location)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_super_admin<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE role = 'super_admin' ORDER BY id LIMIT 1",
    )
    .fetch_optional(executor)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: i64,
    update: &ProfileUpdate,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET
            full_name = COALESCE($2, full_name),
            phone = COALESCE($3, phone),
            location = COALESCE($4, location),
            resume_headline = COALESCE($5, resume_headline)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(update.full_name.as_deref())
    .bind(update.phone.as_deref())
    .bind(update.location.as_deref())
    .bind(update.resume_headline.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn set_role<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
    role: Role,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET role = $2, is_admin = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(role.as_str())
    .bind(role.is_admin())
    .fetch_optional(executor)
    .await
}

/// Dependent profile rows, applications and referrals go with the user.
/// Fails with a foreign key violation while the user still owns jobs.
pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
