use async_trait::async_trait;
use flightdesk_shared::FlightRecord;

/// Where flight snapshots come from.
#[async_trait]
pub trait FlightSource: Send + Sync {
    /// Fetch the full flight collection. No paging, no query parameters.
    async fn fetch_flights(
        &self,
    ) -> Result<Vec<FlightRecord>, Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait]
impl<T: FlightSource + ?Sized> FlightSource for Box<T> {
    async fn fetch_flights(
        &self,
    ) -> Result<Vec<FlightRecord>, Box<dyn std::error::Error + Send + Sync>> {
        (**self).fetch_flights().await
    }
}
