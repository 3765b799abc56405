pub mod search;
pub mod repository;
pub mod session;
pub mod table;

pub use flightdesk_shared::{FlightRecord, FlightStatus, RecordField};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(
        "Flight record #{index} ({}) is missing required field `{field}`",
        .record_id.as_deref().map_or_else(|| "no id".to_string(), |id| format!("id {}", id))
    )]
    MissingField {
        index: usize,
        record_id: Option<String>,
        field: RecordField,
    },
    #[error(
        "Flight record #{index} ({}) has a non-text value in field `{field}`",
        .record_id.as_deref().map_or_else(|| "no id".to_string(), |id| format!("id {}", id))
    )]
    WrongType {
        index: usize,
        record_id: Option<String>,
        field: RecordField,
    },
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
