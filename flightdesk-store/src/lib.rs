pub mod app_config;
pub mod error;
pub mod http_source;
pub mod static_source;

pub use error::FetchError;
pub use http_source::HttpFlightSource;
pub use static_source::StaticFlightSource;
