use super::types::BmkgDocument;
use crate::config::Config;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BmkgError {
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Upstream returned HTTP {0}")]
    Status(StatusCode),
    #[error("XML parsing failed: {0}")]
    Parse(#[from] quick_xml::DeError),
    #[error("Malformed timerange datetime: {0:?}")]
    InvalidTimestamp(String),
}

/// Client for the BMKG DigitalForecast XML feed. One attempt per call, no retry.
pub struct BmkgClient {
    client: Client,
    base_url: String,
}

impl BmkgClient {
    pub fn new(config: &Config) -> Result<Self, BmkgError> {
        let client = Client::builder()
            .user_agent("BmkgForecastServer/1.0")
            .timeout(Duration::from_secs(config.bmkg_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.bmkg_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn document_url(&self, province_code: &str) -> String {
        format!("{}/DigitalForecast-{}.xml", self.base_url, province_code)
    }

    pub async fn fetch(&self, province_code: &str) -> Result<BmkgDocument, BmkgError> {
        let url = self.document_url(province_code);
        tracing::debug!("Fetching upstream forecast from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(province = province_code, %status, "Upstream forecast request rejected");
            return Err(BmkgError::Status(status));
        }

        let body = response.text().await?;
        parse_document(&body)
    }
}

pub fn parse_document(xml: &str) -> Result<BmkgDocument, BmkgError> {
    Ok(quick_xml::de::from_str(xml)?)
}
