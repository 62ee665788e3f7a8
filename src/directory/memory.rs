use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::CompanyStore;
use crate::error::AppError;
use crate::models::{Company, CompanyChanges};

/// Ephemeral company list held in process memory.
pub struct MemoryCompanyStore {
    companies: Mutex<BTreeMap<i64, Company>>,
}

impl MemoryCompanyStore {
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            companies: Mutex::new(companies.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    pub fn with_demo_companies() -> Self {
        Self::new(demo_companies())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<i64, Company>>, AppError> {
        self.companies
            .lock()
            .map_err(|_| AppError::Internal("Company directory lock poisoned".to_string()))
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Company>, AppError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Company>, AppError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn create(&self, changes: CompanyChanges) -> Result<Company, AppError> {
        let mut companies = self.lock()?;
        let id = companies.keys().next_back().map_or(1, |max| max + 1);
        let company = changes.into_company(id);
        companies.insert(id, company.clone());
        Ok(company)
    }

    async fn update(&self, id: i64, changes: CompanyChanges) -> Result<Option<Company>, AppError> {
        let mut companies = self.lock()?;
        Ok(companies.get_mut(&id).map(|company| {
            changes.apply_to(company);
            company.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}

fn demo_companies() -> Vec<Company> {
    let entries = [
        ("Zoho", "Software Product", "Zoho Corp", "https://logo.clearbit.com/zoho.com"),
        ("Wipro", "IT Services & Consulting", "Wipro Ltd", "https://logo.clearbit.com/wipro.com"),
        ("Crestocode Product", "Software Product", "Crestocode", "/uploads/crestocode-logo.png"),
        ("Paytm", "Fintech", "Paytm", "https://logo.clearbit.com/paytm.com"),
        ("Tata Consultancy Services", "IT Services & Consulting", "TCS", "https://logo.clearbit.com/tcs.com"),
        ("Infosys", "IT Services & Consulting", "Infosys", "https://logo.clearbit.com/infosys.com"),
        ("Amazon", "E-commerce", "Amazon", "https://logo.clearbit.com/amazon.com"),
        ("Google", "Software Product", "Google", "https://logo.clearbit.com/google.com"),
        ("HCL Technologies", "IT Services & Consulting", "HCL", "https://logo.clearbit.com/hcltech.com"),
        ("Flipkart", "E-commerce", "Flipkart", "https://logo.clearbit.com/flipkart.com"),
    ];

    entries
        .into_iter()
        .zip(1..)
        .map(|((name, industry, description, logo_url), id)| Company {
            id,
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            website: String::new(),
            industry: industry.to_string(),
            description: description.to_string(),
            status: true,
            logo_url: logo_url.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> CompanyChanges {
        CompanyChanges {
            name: Some(name.to_string()),
            ..CompanyChanges::default()
        }
    }

    #[tokio::test]
    async fn starts_with_demo_companies() {
        let store = MemoryCompanyStore::with_demo_companies();
        let companies = store.list().await.unwrap();
        assert_eq!(companies.len(), 10);
        assert_eq!(companies[0].name, "Zoho");
        assert_eq!(store.get(8).await.unwrap().unwrap().name, "Google");
    }

    #[tokio::test]
    async fn create_assigns_next_id_after_max() {
        let store = MemoryCompanyStore::with_demo_companies();
        let created = store.create(named("Acme")).await.unwrap();
        assert_eq!(created.id, 11);
        assert!(created.status);

        let empty = MemoryCompanyStore::new(Vec::new());
        assert_eq!(empty.create(named("First")).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let store = MemoryCompanyStore::with_demo_companies();

        let updated = store.update(1, named("Zoho Corp")).await.unwrap().unwrap();
        assert_eq!(updated.name, "Zoho Corp");
        assert_eq!(updated.industry, "Software Product");

        assert!(store.update(99, named("Ghost")).await.unwrap().is_none());
        assert!(store.delete(2).await.unwrap());
        assert!(!store.delete(2).await.unwrap());
        assert!(store.get(2).await.unwrap().is_none());
    }
}
