//! Company profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::CompanyDefaults;

/// The single company profile stamped on reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Company name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Tax identifier.
    pub tax_id: String,
    /// Logo as a data URL or file path.
    pub logo: Option<String>,
    /// Last time the profile was saved; `None` if never stored.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&CompanyDefaults> for CompanyProfile {
    fn from(defaults: &CompanyDefaults) -> Self {
        Self {
            name: defaults.name.clone(),
            phone: defaults.phone.clone(),
            email: defaults.email.clone(),
            address: defaults.address.clone(),
            tax_id: defaults.tax_id.clone(),
            logo: None,
            updated_at: None,
        }
    }
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self::from(&CompanyDefaults::default())
    }
}
