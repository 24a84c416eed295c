//! Google Sheets v4 REST client
//!
//! Production implementation of [`SheetClient`]. Holds one pooled
//! `reqwest::Client` and the token manager; both are shared by every request.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::auth::AuthManager;
use super::constants::{INSERT_DATA_OPTION, VALUE_INPUT_OPTION};
use super::error::ClientError;
use super::models::{
    AppendValuesResponse, ClearValuesResponse, UpdateValuesResponse, ValueRange, ValueRangeBody,
};
use crate::config::Config;
use crate::sheets::SheetClient;

pub struct SheetsClient {
    http: reqwest::Client,
    auth: AuthManager,
    base_url: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Build the client from startup configuration.
    ///
    /// Reads the credentials file and parses its private key right away so a
    /// bad key stops the process before it starts serving.
    pub fn new(config: &Config) -> Result<Self> {
        info!(
            "Loaded credentials file path: {}",
            config.credentials_file.display()
        );
        info!("Loaded Spreadsheet ID: {}", config.spreadsheet_id);

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let auth = AuthManager::from_key_file(&config.credentials_file, http.clone())
            .context("Failed to authenticate Google Sheets service")?;

        info!(
            "Successfully initialized Google Sheets service as {}",
            auth.client_email()
        );

        Ok(Self {
            http,
            auth,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
        })
    }

    /// URL of a `values` resource, e.g. `.../values/Sheet1%21A2%3AC2:clear`
    fn values_url(&self, range: &str, suffix: &str) -> String {
        values_url(&self.base_url, &self.spreadsheet_id, range, suffix)
    }

    /// Attach the bearer token, send, and decode the JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn values_url(base_url: &str, spreadsheet_id: &str, range: &str, suffix: &str) -> String {
    format!(
        "{}/v4/spreadsheets/{}/values/{}{}",
        base_url,
        urlencoding::encode(spreadsheet_id),
        urlencoding::encode(range),
        suffix
    )
}

#[async_trait]
impl SheetClient for SheetsClient {
    async fn get_values(&self, range: &str) -> Result<ValueRange, ClientError> {
        debug!("GET values {}", range);
        let request = self.http.get(self.values_url(range, ""));
        self.send(request).await
    }

    async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<AppendValuesResponse, ClientError> {
        debug!("APPEND values {} ({} rows)", range, values.len());
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values: &values,
        };
        let request = self
            .http
            .post(self.values_url(range, ":append"))
            .query(&[
                ("valueInputOption", VALUE_INPUT_OPTION),
                ("insertDataOption", INSERT_DATA_OPTION),
            ])
            .json(&body);
        self.send(request).await
    }

    async fn update_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<UpdateValuesResponse, ClientError> {
        debug!("UPDATE values {}", range);
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values: &values,
        };
        let request = self
            .http
            .put(self.values_url(range, ""))
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&body);
        self.send(request).await
    }

    async fn clear_values(&self, range: &str) -> Result<ClearValuesResponse, ClientError> {
        debug!("CLEAR values {}", range);
        let request = self
            .http
            .post(self.values_url(range, ":clear"))
            .json(&serde_json::json!({}));
        self.send(request).await
    }
}
