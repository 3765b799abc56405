use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status of a flight as published by the flights service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Cancelled,
    Pending,
    Rescheduled,
    Boarding,
    #[serde(rename = "Gate Closed")]
    GateClosed,
    #[serde(rename = "In Flight")]
    InFlight,
    Diverted,
    Landed,
    Arrived,
}

impl FlightStatus {
    /// Every status, in the order the search form offers them.
    pub const ALL: [FlightStatus; 11] = [
        FlightStatus::OnTime,
        FlightStatus::Delayed,
        FlightStatus::Cancelled,
        FlightStatus::Pending,
        FlightStatus::Rescheduled,
        FlightStatus::Boarding,
        FlightStatus::GateClosed,
        FlightStatus::InFlight,
        FlightStatus::Diverted,
        FlightStatus::Landed,
        FlightStatus::Arrived,
    ];

    /// The exact label used on the wire and in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Pending => "Pending",
            FlightStatus::Rescheduled => "Rescheduled",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::GateClosed => "Gate Closed",
            FlightStatus::InFlight => "In Flight",
            FlightStatus::Diverted => "Diverted",
            FlightStatus::Landed => "Landed",
            FlightStatus::Arrived => "Arrived",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown flight status: {0:?}")]
pub struct UnknownStatus(pub String);

/// Labels are matched exactly; "delayed" is not "Delayed".
impl FromStr for FlightStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlightStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
