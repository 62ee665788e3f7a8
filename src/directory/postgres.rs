use async_trait::async_trait;
use sqlx::PgPool;

use super::CompanyStore;
use crate::db;
use crate::error::AppError;
use crate::models::{Company, CompanyChanges};

pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Company>, AppError> {
        Ok(db::companies::list(&self.pool).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<Company>, AppError> {
        Ok(db::companies::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, changes: CompanyChanges) -> Result<Company, AppError> {
        // The id is assigned by the sequence.
        let draft = changes.into_company(0);
        Ok(db::companies::create(&self.pool, &draft).await?)
    }

    async fn update(&self, id: i64, changes: CompanyChanges) -> Result<Option<Company>, AppError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut company) = db::companies::find_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut company);
        let updated = db::companies::update(&mut *tx, &company).await?;
        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(db::companies::delete(&self.pool, id).await?)
    }
}
