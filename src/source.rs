//! Loan source
//!
//! Client for the library backend's REST API, which owns the loan records.
//! This service only reads; checkout/return/renewal all happen on the
//! backend. Failures surface as `AppError::LoanSource` and are not retried
//! here.

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
    models::LoanRecord,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanSource: Send + Sync {
    /// All loans not yet returned, system-wide
    async fn active_loans(&self) -> AppResult<Vec<LoanRecord>>;

    /// All archived (returned) loans, system-wide
    async fn archived_loans(&self) -> AppResult<Vec<LoanRecord>>;
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    async fn fetch_loans(&self, path: &str) -> AppResult<Vec<LoanRecord>> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::LoanSource(format!(
                "Backend returned {} for {}",
                response.status(),
                path
            )));
        }

        Ok(response.json::<Vec<LoanRecord>>().await?)
    }
}

#[async_trait]
impl LoanSource for BackendClient {
    async fn active_loans(&self) -> AppResult<Vec<LoanRecord>> {
        self.fetch_loans("/loans?status=active").await
    }

    async fn archived_loans(&self) -> AppResult<Vec<LoanRecord>> {
        self.fetch_loans("/loans?status=returned").await
    }
}
