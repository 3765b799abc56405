use async_trait::async_trait;
use flightdesk_core::repository::FlightSource;
use flightdesk_shared::FlightRecord;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use crate::app_config::SourceConfig;
use crate::error::FetchError;

/// Pulls the whole flight collection from the flights REST service.
pub struct HttpFlightSource {
    client: Client,
    url: String,
}

impl HttpFlightSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().user_agent(concat!("flightdesk/", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: config.flights_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<FlightRecord>, FetchError> {
        tracing::debug!(url = %self.url, "Fetching flights");

        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = resp.bytes().await?;
        let records: Vec<FlightRecord> = serde_json::from_slice(&body)?;
        tracing::debug!(count = records.len(), "Fetched flights");
        Ok(records)
    }
}

#[async_trait]
impl FlightSource for HttpFlightSource {
    async fn fetch_flights(&self) -> Result<Vec<FlightRecord>, Box<dyn Error + Send + Sync>> {
        Ok(self.fetch().await?)
    }
}
