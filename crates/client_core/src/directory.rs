use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::ApiErrorBody,
    protocol::{CompaniesResponse, Company, CompanyQuery},
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const LOAD_FAILURE_PREFIX: &str = "Failed to load catering companies";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status code {}", .status.as_u16())]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("malformed companies response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LoadError {
    /// Most specific diagnostic available: the server's `detail` when it sent
    /// one, the raw failure otherwise.
    pub fn diagnostic(&self) -> String {
        match self {
            LoadError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

pub fn load_failure_message(err: &LoadError) -> String {
    format!("{LOAD_FAILURE_PREFIX}: {}", err.diagnostic())
}

#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn list_companies(&self, query: &CompanyQuery) -> Result<Vec<Company>, LoadError>;
}

pub struct HttpCompanyDirectory {
    http: Client,
    backend_url: String,
}

impl HttpCompanyDirectory {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), backend_url)
    }

    pub fn with_client(http: Client, backend_url: impl Into<String>) -> Self {
        Self {
            http,
            backend_url: backend_url.into(),
        }
    }

    fn companies_url(&self) -> String {
        format!("{}/api/companies", self.backend_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompanyDirectory for HttpCompanyDirectory {
    async fn list_companies(&self, query: &CompanyQuery) -> Result<Vec<Company>, LoadError> {
        let url = self.companies_url();
        debug!(%url, kind = query.kind.as_query_value(), limit = query.limit, "GET companies");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|body| body.detail_message());
            return Err(LoadError::Status { status, detail });
        }

        let body = response.bytes().await?;
        let decoded: CompaniesResponse = serde_json::from_slice(&body)?;
        Ok(decoded.companies)
    }
}

/// Runs one catering load and collapses any failure into the banner message.
///
/// Nothing past this function sees a typed error.
pub async fn load_catering_companies(
    directory: &dyn CompanyDirectory,
) -> Result<Vec<Company>, String> {
    match directory.list_companies(&CompanyQuery::catering()).await {
        Ok(companies) => {
            info!(count = companies.len(), "loaded catering companies");
            Ok(companies)
        }
        Err(err) => {
            warn!("catering company load failed: {err}");
            Err(load_failure_message(&err))
        }
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
