//! Company directory behind a storage trait.
//!
//! The Postgres store is the default. The memory store keeps the demo
//! company list in process and loses every change on restart.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::CompanyStoreKind;
use crate::error::AppError;
use crate::models::{Company, CompanyChanges};

#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Storage backend name, for logs.
    fn kind(&self) -> &'static str;
    async fn list(&self) -> Result<Vec<Company>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Company>, AppError>;
    async fn create(&self, changes: CompanyChanges) -> Result<Company, AppError>;
    /// Returns `None` when no company has this id.
    async fn update(&self, id: i64, changes: CompanyChanges) -> Result<Option<Company>, AppError>;
    /// Returns `false` when no company has this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub fn build_store(kind: CompanyStoreKind, pool: PgPool) -> Arc<dyn CompanyStore> {
    match kind {
        CompanyStoreKind::Postgres => Arc::new(postgres::PgCompanyStore::new(pool)),
        CompanyStoreKind::Memory => Arc::new(memory::MemoryCompanyStore::with_demo_companies()),
    }
}
