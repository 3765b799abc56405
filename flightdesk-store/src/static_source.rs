use async_trait::async_trait;
use flightdesk_core::repository::FlightSource;
use flightdesk_shared::FlightRecord;
use std::error::Error;
use std::path::Path;
use crate::error::FetchError;

/// A fixed flight collection, e.g. a JSON dump of the service for offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticFlightSource {
    records: Vec<FlightRecord>,
}

impl StaticFlightSource {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    /// Same payload shape as `GET /flights`.
    pub async fn from_json_file(path: &Path) -> Result<Self, FetchError> {
        let raw = tokio::fs::read(path).await?;
        let records: Vec<FlightRecord> = serde_json::from_slice(&raw)?;
        tracing::info!(count = records.len(), path = %path.display(), "Loaded flights from file");
        Ok(Self::new(records))
    }
}

#[async_trait]
impl FlightSource for StaticFlightSource {
    async fn fetch_flights(&self) -> Result<Vec<FlightRecord>, Box<dyn Error + Send + Sync>> {
        Ok(self.records.clone())
    }
}
