#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::MockServer;

use lejet_booking::api::ApiClient;
use lejet_booking::models::booking::{Booking, BookingWire, TripType};
use lejet_booking::models::flight::{Flight, SeatClass};
use lejet_booking::services::workflow::{BookingWorkflow, SearchCriteria};

pub const ACCRA: &str = "Accra (Kotoka Airport)";
pub const KUMASI: &str = "Kumasi Airport";

/// Mocked booking backend plus a client pointed at it. One per test.
pub struct TestBackend {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestBackend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = ApiClient::new(server.uri());
        TestBackend { server, client }
    }
}

pub fn flight_json(
    id: &str,
    from: &str,
    to: &str,
    departure: &str,
    arrival: &str,
    economy: i64,
    first_class: i64,
) -> Value {
    json!({
        "_id": id,
        "from": from,
        "to": to,
        "departureTime": departure,
        "arrivalTime": arrival,
        "airplane": { "name": "LEJET Express", "capacity": 150 },
        "economyPrice": economy,
        "firstClassPrice": first_class,
        "availableSeats": { "economy": 42, "firstClass": 8 },
        "status": "scheduled",
    })
}

pub fn flight(
    id: &str,
    from: &str,
    to: &str,
    departure: &str,
    arrival: &str,
    economy: i64,
    first_class: i64,
) -> Flight {
    serde_json::from_value(flight_json(id, from, to, departure, arrival, economy, first_class))
        .expect("valid flight json")
}

pub fn pending_booking_json(id: &str, flight: Value, passengers: u32, total: i64) -> Value {
    json!({
        "_id": id,
        "flight": flight,
        "seatClass": "economy",
        "passengers": passengers,
        "totalAmount": total,
        "status": "pending",
    })
}

pub fn booking_from_json(value: Value) -> Booking {
    let wire: BookingWire = serde_json::from_value(value).expect("valid booking json");
    wire.try_into().expect("normalizable booking")
}

pub fn one_way_criteria(passengers: u32) -> SearchCriteria {
    SearchCriteria {
        trip_type: TripType::OneWay,
        from: ACCRA.to_string(),
        to: KUMASI.to_string(),
        departure_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        return_date: None,
        passengers,
        seat_class: SeatClass::Economy,
    }
}

pub fn round_trip_criteria(passengers: u32) -> SearchCriteria {
    SearchCriteria {
        trip_type: TripType::RoundTrip,
        from: ACCRA.to_string(),
        to: KUMASI.to_string(),
        departure_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        return_date: Some(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()),
        passengers,
        seat_class: SeatClass::Economy,
    }
}

/// A one-way workflow driven to `Drafted`: Accra -> Kumasi, economy @500.
pub fn drafted_one_way_workflow(passengers: u32) -> BookingWorkflow {
    let mut workflow = BookingWorkflow::new(one_way_criteria(passengers)).unwrap();
    let ticket = workflow.begin_outbound_search();
    workflow.apply_outbound_results(
        ticket,
        vec![flight(
            "FL-100",
            ACCRA,
            KUMASI,
            "2025-03-10T08:00:00Z",
            "2025-03-10T09:00:00Z",
            500,
            900,
        )],
    );
    workflow.select_outbound("FL-100").unwrap();
    workflow
}

/// A one-way workflow driven past persistence, ready for payment.
pub fn awaiting_one_way_workflow(passengers: u32) -> BookingWorkflow {
    let mut workflow = drafted_one_way_workflow(passengers);
    let total = 500 * i64::from(passengers);
    let booking = booking_from_json(pending_booking_json(
        "BK-1",
        flight_json(
            "FL-100",
            ACCRA,
            KUMASI,
            "2025-03-10T08:00:00Z",
            "2025-03-10T09:00:00Z",
            500,
            900,
        ),
        passengers,
        total,
    ));
    workflow.booking_persisted(booking).unwrap();
    workflow
}
