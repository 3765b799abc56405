use serde::{Deserialize, Serialize};
use flightdesk_shared::{FlightRecord, FlightStatus, RecordField};
use crate::{CoreError, CoreResult};

/// What the user typed into the search form. Empty strings constrain nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Matched case-insensitively against flight number, origin and destination.
    pub query: String,
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub status: Option<FlightStatus>,
}

impl SearchCriteria {
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Keep the records matching every criterion, in their original order.
///
/// The seven schedule and route fields are read on every record; `status` is
/// read only when a status is selected. A record lacking a field it is
/// checked on fails the whole call with [`CoreError::MissingField`], or with
/// [`CoreError::WrongType`] if the service sent that field as a non-string.
pub fn filter_flights(
    records: &[FlightRecord],
    criteria: &SearchCriteria,
) -> CoreResult<Vec<FlightRecord>> {
    let query = criteria.query.to_lowercase();
    let mut results = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if record_matches(index, record, criteria, &query)? {
            results.push(record.clone());
        }
    }

    Ok(results)
}

fn record_matches(
    index: usize,
    record: &FlightRecord,
    criteria: &SearchCriteria,
    lower_query: &str,
) -> CoreResult<bool> {
    let field = move |f: RecordField| require(index, record, f);

    let flight_number = field(RecordField::FlightNumber)?;
    let origin = field(RecordField::Origin)?;
    let destination = field(RecordField::Destination)?;
    let departure_date = field(RecordField::DepartureDate)?;
    let departure_time = field(RecordField::DepartureTime)?;
    let arrival_date = field(RecordField::ArrivalDate)?;
    let arrival_time = field(RecordField::ArrivalTime)?;

    let text_match = [flight_number, origin, destination]
        .iter()
        .any(|value| value.to_lowercase().contains(lower_query));

    let schedule_match = departure_date.contains(criteria.departure_date.as_str())
        && departure_time.contains(criteria.departure_time.as_str())
        && arrival_date.contains(criteria.arrival_date.as_str())
        && arrival_time.contains(criteria.arrival_time.as_str());

    let status_match = match criteria.status {
        Some(status) => field(RecordField::Status)? == status.as_str(),
        None => true,
    };

    Ok(text_match && schedule_match && status_match)
}

fn require(index: usize, record: &FlightRecord, field: RecordField) -> CoreResult<&str> {
    let record_id = || record.id.clone();
    if record.is_mistyped(field) {
        return Err(CoreError::WrongType { index, record_id: record_id(), field });
    }
    record.get(field).ok_or_else(|| CoreError::MissingField {
        index,
        record_id: record_id(),
        field,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use flightdesk_shared::FlightRecord;

    pub fn aa100() -> FlightRecord {
        FlightRecord::new(
            "f-aa100", "AA100", "JFK", "LAX", "2024-01-01T10:00", "10:00", "2024-01-01T14:00",
            "14:00", "On Time",
        )
    }

    pub fn ba200() -> FlightRecord {
        FlightRecord::new(
            "f-ba200", "BA200", "LHR", "JFK", "2024-01-02T09:00", "09:00", "2024-01-02T17:00",
            "17:00", "Delayed",
        )
    }

    pub fn dl300() -> FlightRecord {
        FlightRecord::new(
            "f-dl300", "dl300", "ATL", "SEA", "2024-01-03T07:30", "07:30", "2024-01-03T10:05",
            "10:05", "Gate Closed",
        )
    }

    pub fn scenario() -> Vec<FlightRecord> {
        vec![aa100(), ba200()]
    }
}
