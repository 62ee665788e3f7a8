use sqlx::PgPool;

use crate::models::Company;

pub async fn list(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_for_update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Insert `company`; its `id` is ignored in favour of the sequence.
pub async fn create(pool: &PgPool, company: &Company) -> Result<Company, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "INSERT INTO companies (name, email, phone, address, website, industry, description, status, logo_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(&company.name)
    .bind(&company.email)
    .bind(&company.phone)
    .bind(&company.address)
    .bind(&company.website)
    .bind(&company.industry)
    .bind(&company.description)
    .bind(company.status)
    .bind(&company.logo_url)
    .fetch_one(pool)
    .await
}

pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    company: &Company,
) -> Result<Company, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "UPDATE companies SET name = $2, email = $3, phone = $4, address = $5, website = $6,
            industry = $7, description = $8, status = $9, logo_url = $10
         WHERE id = $1 RETURNING *",
    )
    .bind(company.id)
    .bind(&company.name)
    .bind(&company.email)
    .bind(&company.phone)
    .bind(&company.address)
    .bind(&company.website)
    .bind(&company.industry)
    .bind(&company.description)
    .bind(company.status)
    .bind(&company.logo_url)
    .fetch_one(executor)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
