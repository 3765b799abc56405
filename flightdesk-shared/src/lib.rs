pub mod models;

pub use models::flight::{FlightRecord, RecordField};
pub use models::status::{FlightStatus, UnknownStatus};
