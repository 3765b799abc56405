use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A flight as returned by the flights service.
///
/// Every field is optional on the wire. Completeness is checked where the
/// fields are read, so a bad record can be reported with its position and
/// id instead of failing the whole payload. A text field holding a non-string
/// value decodes as `None` and is reported by [`FlightRecord::is_mistyped`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireRecord")]
pub struct FlightRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>, // date-time, e.g. 2024-01-01T10:00
    pub departure_time: Option<String>,
    pub arrival_date: Option<String>,
    pub arrival_time: Option<String>,
    pub status: Option<String>,
    #[serde(skip)]
    mistyped: Vec<RecordField>,
}

impl FlightRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        flight_number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
        departure_time: impl Into<String>,
        arrival_date: impl Into<String>,
        arrival_time: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            flight_number: Some(flight_number.into()),
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            departure_date: Some(departure_date.into()),
            departure_time: Some(departure_time.into()),
            arrival_date: Some(arrival_date.into()),
            arrival_time: Some(arrival_time.into()),
            status: Some(status.into()),
            mistyped: Vec::new(),
        }
    }

    /// Read one text field, `None` if the service omitted it.
    pub fn get(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::FlightNumber => &self.flight_number,
            RecordField::Origin => &self.origin,
            RecordField::Destination => &self.destination,
            RecordField::DepartureDate => &self.departure_date,
            RecordField::DepartureTime => &self.departure_time,
            RecordField::ArrivalDate => &self.arrival_date,
            RecordField::ArrivalTime => &self.arrival_time,
            RecordField::Status => &self.status,
        };
        value.as_deref()
    }

    /// True if the service sent `field` with a value that is not text.
    pub fn is_mistyped(&self, field: RecordField) -> bool {
        self.mistyped.contains(&field)
    }
}

/// Wire shape of a record before the text fields are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "opaque_id")]
    id: Option<String>,
    #[serde(default)]
    flight_number: Option<Value>,
    #[serde(default)]
    origin: Option<Value>,
    #[serde(default)]
    destination: Option<Value>,
    #[serde(default)]
    departure_date: Option<Value>,
    #[serde(default)]
    departure_time: Option<Value>,
    #[serde(default)]
    arrival_date: Option<Value>,
    #[serde(default)]
    arrival_time: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
}

impl From<WireRecord> for FlightRecord {
    fn from(wire: WireRecord) -> Self {
        let mut mistyped = Vec::new();
        let mut text = |field: RecordField, value: Option<Value>| match value {
            Some(Value::String(s)) => Some(s),
            None | Some(Value::Null) => None,
            Some(_) => {
                mistyped.push(field);
                None
            }
        };

        let flight_number = text(RecordField::FlightNumber, wire.flight_number);
        let origin = text(RecordField::Origin, wire.origin);
        let destination = text(RecordField::Destination, wire.destination);
        let departure_date = text(RecordField::DepartureDate, wire.departure_date);
        let departure_time = text(RecordField::DepartureTime, wire.departure_time);
        let arrival_date = text(RecordField::ArrivalDate, wire.arrival_date);
        let arrival_time = text(RecordField::ArrivalTime, wire.arrival_time);
        let status = text(RecordField::Status, wire.status);

        Self {
            id: wire.id,
            flight_number,
            origin,
            destination,
            departure_date,
            departure_time,
            arrival_date,
            arrival_time,
            status,
            mistyped,
        }
    }
}

/// The text fields of a [`FlightRecord`], in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    FlightNumber,
    Origin,
    Destination,
    DepartureDate,
    DepartureTime,
    ArrivalDate,
    ArrivalTime,
    Status,
}

impl RecordField {
    pub const ALL: [RecordField; 8] = [
        RecordField::FlightNumber,
        RecordField::Origin,
        RecordField::Destination,
        RecordField::DepartureDate,
        RecordField::DepartureTime,
        RecordField::ArrivalDate,
        RecordField::ArrivalTime,
        RecordField::Status,
    ];

    /// Key used by the flights service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RecordField::FlightNumber => "flightNumber",
            RecordField::Origin => "origin",
            RecordField::Destination => "destination",
            RecordField::DepartureDate => "departureDate",
            RecordField::DepartureTime => "departureTime",
            RecordField::ArrivalDate => "arrivalDate",
            RecordField::ArrivalTime => "arrivalTime",
            RecordField::Status => "status",
        }
    }

    /// Column header shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::FlightNumber => "Flight Number",
            RecordField::Origin => "Origin",
            RecordField::Destination => "Destination",
            RecordField::DepartureDate => "Departure Date",
            RecordField::DepartureTime => "Departure Time",
            RecordField::ArrivalDate => "Arrival Date",
            RecordField::ArrivalTime => "Arrival Time",
            RecordField::Status => "Status",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// Ids are opaque: accept plain strings, numbers and Mongo-style {"$oid": ".."}.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Object(map)) => match map.get("$oid") {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            _ => Err(serde::de::Error::custom("object id without a string $oid")),
        },
        Some(other) => Err(serde::de::Error::custom(format!(
            "unsupported id value: {}",
            other
        ))),
    }
}
