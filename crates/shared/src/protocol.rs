use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CompanyId, CompanyKind};

/// Page size the directory view asks for. There is no further paging.
pub const CATERING_PAGE_LIMIT: u32 = 100;

/// Query string of `GET /api/companies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanyQuery {
    #[serde(rename = "type")]
    pub kind: CompanyKind,
    pub limit: u32,
}

impl CompanyQuery {
    pub fn catering() -> Self {
        Self {
            kind: CompanyKind::Catering,
            limit: CATERING_PAGE_LIMIT,
        }
    }
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompaniesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<CompanyAddress>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    /// RFC 3339 timestamp as sent by the backend. Parsed only for display.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<CompanyCounts>,
}

/// The backend sends either a bare string or an object with a `text` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyAddress {
    Plain(String),
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl CompanyAddress {
    /// Text to show for this address, or `None` when it carries nothing.
    pub fn display_text(&self) -> Option<&str> {
        let text = match self {
            CompanyAddress::Plain(text) => text.as_str(),
            CompanyAddress::Structured { text } => text.as_deref()?,
        };
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// A plain address that is empty counts as no address at all.
    pub fn is_blank_plain(&self) -> bool {
        matches!(self, CompanyAddress::Plain(text) if text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub individual: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub corporate: u64,
}

impl CompanyCounts {
    pub fn total(&self) -> u64 {
        self.individual.saturating_add(self.corporate)
    }
}
