use serde::{Deserialize, Serialize};

use crate::auth::TokenProvider;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;
use crate::types::{BatchUpdateRequest, BatchUpdateValuesRequest, Request, ValueRange, USER_ENTERED};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Authenticated client scoped to one spreadsheet.
pub struct SheetsClient {
    http: reqwest::Client,
    auth: TokenProvider,
    spreadsheet_id: String,
    base_url: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: impl Into<String>) -> Self {
        let http = reqwest::Client::new();
        Self {
            auth: TokenProvider::new(key, http.clone()),
            http,
            spreadsheet_id: spreadsheet_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Push a batch of cell values via `values:batchUpdate`.
    ///
    /// Values are submitted as user-entered, so formula strings are
    /// evaluated by the document rather than stored literally.
    pub async fn batch_update_values(&self, data: Vec<ValueRange>) -> Result<(), SheetsError> {
        let url = format!(
            "{}/{}/values:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = BatchUpdateValuesRequest {
            value_input_option: USER_ENTERED,
            data,
        };
        self.post(&url, &body).await?;
        Ok(())
    }

    /// Push a batch of formatting requests via `spreadsheets.batchUpdate`.
    pub async fn batch_format(&self, requests: Vec<Request>) -> Result<(), SheetsError> {
        let url = format!("{}/{}:batchUpdate", self.base_url, self.spreadsheet_id);
        let body = BatchUpdateRequest { requests };
        self.post(&url, &body).await?;
        Ok(())
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<(), SheetsError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or(text);
        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
