use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub industry: String,
    pub description: String,
    pub status: bool,
    pub logo_url: String,
}

/// Field values submitted through the company form. `None` leaves the
/// stored value untouched on update and falls back to the default on create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
    pub logo_url: Option<String>,
}

impl CompanyChanges {
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let text = |key: &str| fields.get(key).map(|v| v.trim().to_string());
        Self {
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            address: text("address"),
            website: text("website"),
            industry: text("industry"),
            description: text("description"),
            status: fields.get("status").map(|v| parse_status(v)),
            logo_url: None,
        }
    }

    /// Build a new company record. Status defaults to active.
    pub fn into_company(self, id: i64) -> Company {
        Company {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            website: self.website.unwrap_or_default(),
            industry: self.industry.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or(true),
            logo_url: self.logo_url.unwrap_or_default(),
        }
    }

    pub fn apply_to(self, company: &mut Company) {
        let fields = [
            (self.name, &mut company.name),
            (self.email, &mut company.email),
            (self.phone, &mut company.phone),
            (self.address, &mut company.address),
            (self.website, &mut company.website),
            (self.industry, &mut company.industry),
            (self.description, &mut company.description),
            (self.logo_url, &mut company.logo_url),
        ];
        for (change, slot) in fields {
            if let Some(value) = change {
                *slot = value;
            }
        }
        if let Some(status) = self.status {
            company.status = status;
        }
    }
}

fn parse_status(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "True")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::CompanyChanges;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_company_defaults_to_active() {
        let company = CompanyChanges::from_form(&form(&[("name", "Acme")])).into_company(3);
        assert_eq!(company.id, 3);
        assert_eq!(company.name, "Acme");
        assert!(company.status);
        assert_eq!(company.logo_url, "");
    }

    #[test]
    fn status_is_true_only_for_literal_true() {
        let off = CompanyChanges::from_form(&form(&[("status", "false")]));
        assert_eq!(off.status, Some(false));
        let yes = CompanyChanges::from_form(&form(&[("status", "yes")]));
        assert_eq!(yes.status, Some(false));
        let on = CompanyChanges::from_form(&form(&[("status", "True")]));
        assert_eq!(on.status, Some(true));
    }

    #[test]
    fn update_only_touches_submitted_fields() {
        let mut company = CompanyChanges::from_form(&form(&[
            ("name", "Acme"),
            ("industry", "Tools"),
        ]))
        .into_company(1);

        CompanyChanges::from_form(&form(&[("industry", "Rockets"), ("status", "false")]))
            .apply_to(&mut company);

        assert_eq!(company.name, "Acme");
        assert_eq!(company.industry, "Rockets");
        assert!(!company.status);
    }
}
