use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub const UNASSIGNED_AIRCRAFT: &str = "Aircraft Not Assigned";

/// The four airports the airline serves.
pub const AIRPORTS: [&str; 4] = [
    "Accra (Kotoka Airport)",
    "Kumasi Airport",
    "Tamale Airport",
    "Takoradi Airport",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum SeatClass {
    #[strum(serialize = "economy", to_string = "Economy")]
    Economy,
    #[strum(serialize = "firstClass", serialize = "first", to_string = "First Class")]
    FirstClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airplane {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_location: Option<String>,
}

/// Remaining seats per class.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    #[serde(default)]
    pub economy: i32,
    #[serde(default)]
    pub first_class: i32,
}

/// A flight as returned by the backend. Immutable from the traveler's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id")]
    pub id: String,
    pub from: String,
    pub to: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub airplane: Option<Airplane>,
    pub economy_price: Decimal,
    pub first_class_price: Decimal,
    #[serde(default)]
    pub available_seats: SeatAvailability,
    #[serde(default)]
    pub status: FlightStatus,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_days: Vec<DayOfWeek>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    // Present on booking legs once a ticket has been issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
}

impl Flight {
    pub fn price(&self, seat_class: SeatClass) -> Decimal {
        match seat_class {
            SeatClass::Economy => self.economy_price,
            SeatClass::FirstClass => self.first_class_price,
        }
    }

    pub fn seats_remaining(&self, seat_class: SeatClass) -> i32 {
        match seat_class {
            SeatClass::Economy => self.available_seats.economy,
            SeatClass::FirstClass => self.available_seats.first_class,
        }
    }

    pub fn airplane_label(&self) -> &str {
        self.airplane
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or(UNASSIGNED_AIRCRAFT)
    }
}

/// One search leg: origin, destination, travel date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
}

impl FlightQuery {
    /// The instant sent to the backend: midnight UTC of the travel date.
    pub fn departure_instant(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }

    /// The return-leg query: swapped route on the return date.
    pub fn swapped(&self, return_date: NaiveDate) -> FlightQuery {
        FlightQuery {
            from: self.to.clone(),
            to: self.from.clone(),
            date: return_date,
        }
    }
}

/// The search endpoint answers with either a bare list or a wrapped one.
/// Normalized into `Vec<Flight>` right at the boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FlightSearchPayload {
    Wrapped { flights: Vec<Flight> },
    Bare(Vec<Flight>),
}

impl FlightSearchPayload {
    pub fn into_flights(self) -> Vec<Flight> {
        match self {
            FlightSearchPayload::Wrapped { flights } => flights,
            FlightSearchPayload::Bare(flights) => flights,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAirplaneRequest {
    pub name: String,
    pub capacity: u32,
    pub current_location: String,
}

/// Admin flight scheduling payload. Single flights carry full instants in
/// `departure_time`/`arrival_time`; recurring ones carry plain `HH:MM` times
/// plus the weekday set and validity window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFlightRequest {
    pub airplane_id: String,
    pub from: String,
    pub to: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub economy_price: Decimal,
    pub first_class_price: Decimal,
    pub is_recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_days: Option<Vec<DayOfWeek>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}
