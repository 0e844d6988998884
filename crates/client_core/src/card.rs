use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use shared::{
    domain::CompanyId,
    protocol::{Company, CompanyAddress, CompanyCounts},
};

pub const ADDRESS_PLACEHOLDER: &str = "Address not specified";
const CREATED_ON_FORMAT: &str = "%-d.%m.%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountsSummary {
    pub individual: u64,
    pub corporate: u64,
    pub total: u64,
}

impl From<&CompanyCounts> for CountsSummary {
    fn from(counts: &CompanyCounts) -> Self {
        Self {
            individual: counts.individual,
            corporate: counts.corporate,
            total: counts.total(),
        }
    }
}

/// Display strings for one company, shared by the card and the detail dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCard {
    pub id: CompanyId,
    pub title: String,
    pub handle: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub counts: Option<CountsSummary>,
    pub created_on: String,
    pub is_active: bool,
}

impl CompanyCard {
    pub fn from_company(company: &Company) -> Self {
        Self {
            id: company.id.clone(),
            title: company.name.clone(),
            handle: format!("@{}", company.slug),
            phone: company
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string),
            address: address_line(company.address.as_ref()),
            counts: company.counts.as_ref().map(CountsSummary::from),
            created_on: format_created_on(&company.created_at),
            is_active: company.is_active,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }

    pub fn total_count(&self) -> Option<u64> {
        self.counts.map(|counts| counts.total)
    }

    /// Label/value rows of the detail view. Absent fields produce no row.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Handle", self.handle.clone())];
        if let Some(phone) = &self.phone {
            rows.push(("Phone", phone.clone()));
        }
        if let Some(address) = &self.address {
            rows.push(("Address", address.clone()));
        }
        if let Some(counts) = self.counts {
            rows.push(("Individual", counts.individual.to_string()));
            rows.push(("Corporate", counts.corporate.to_string()));
            rows.push(("Total", counts.total.to_string()));
        }
        rows.push(("Created", self.created_on.clone()));
        rows.push(("Status", self.status_label().to_string()));
        rows
    }
}

fn address_line(address: Option<&CompanyAddress>) -> Option<String> {
    let address = address?;
    if address.is_blank_plain() {
        return None;
    }
    Some(
        address
            .display_text()
            .unwrap_or(ADDRESS_PLACEHOLDER)
            .to_string(),
    )
}

/// Calendar date of `raw` (UTC) as `D.MM.YYYY`; unparseable input is
/// returned unchanged.
pub fn format_created_on(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Utc)
            .format(CREATED_ON_FORMAT)
            .to_string();
    }
    // Naive timestamps are taken as UTC.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(CREATED_ON_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format(CREATED_ON_FORMAT).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
