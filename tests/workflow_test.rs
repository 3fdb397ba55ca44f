use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use lejet_booking::models::booking::TripType;
use lejet_booking::models::flight::SeatClass;
use lejet_booking::services::booking::can_cancel;
use lejet_booking::services::fare::compute_fare;
use lejet_booking::services::workflow::{BookingWorkflow, OutboundSelection};
use lejet_booking::utils::error::AppError;

mod common {
    pub mod test_utils;
}
use common::test_utils::{
    awaiting_one_way_workflow, booking_from_json, drafted_one_way_workflow, flight, flight_json,
    one_way_criteria, pending_booking_json, round_trip_criteria, ACCRA, KUMASI,
};

fn utc(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

#[test]
fn test_compute_fare_is_pure_and_multiplies() {
    let flight = flight(
        "FL-1",
        ACCRA,
        KUMASI,
        "2025-03-10T08:00:00Z",
        "2025-03-10T09:00:00Z",
        500,
        900,
    );

    let first = compute_fare(&flight, SeatClass::Economy, 3);
    assert_eq!(first.unit_price, Decimal::from(500));
    assert_eq!(first.total_price, Decimal::from(1500));

    // first-class pricing, and no dependence on prior calls
    let upper = compute_fare(&flight, SeatClass::FirstClass, 2);
    assert_eq!(upper.total_price, Decimal::from(1800));
    let again = compute_fare(&flight, SeatClass::Economy, 3);
    assert_eq!(again, first);
}

#[test]
fn test_criteria_rejects_same_airports() {
    let mut criteria = one_way_criteria(1);
    criteria.to = criteria.from.clone();
    match BookingWorkflow::new(criteria) {
        Err(AppError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_criteria_rejects_bad_passenger_counts() {
    let mut criteria = one_way_criteria(1);
    criteria.passengers = 0;
    assert!(BookingWorkflow::new(criteria.clone()).is_err());
    criteria.passengers = 10;
    assert!(BookingWorkflow::new(criteria).is_err());
}

#[test]
fn test_round_trip_requires_return_date_after_departure() {
    let mut criteria = round_trip_criteria(1);
    criteria.return_date = None;
    assert!(BookingWorkflow::new(criteria.clone()).is_err());

    criteria.return_date = Some("2025-03-09".parse().unwrap());
    assert!(BookingWorkflow::new(criteria).is_err());
}

#[test]
fn test_one_way_draft_totals() {
    let workflow = drafted_one_way_workflow(2);
    let draft = workflow.draft().unwrap();
    assert_eq!(draft.trip_type, TripType::OneWay);
    assert_eq!(draft.outbound.amount, Decimal::from(1000));
    assert_eq!(draft.total_amount, Decimal::from(1000));
    assert!(draft.return_leg.is_none());
}

#[test]
fn test_round_trip_draft_sums_both_legs() {
    let mut workflow = BookingWorkflow::new(round_trip_criteria(2)).unwrap();

    let ticket = workflow.begin_outbound_search();
    workflow.apply_outbound_results(
        ticket,
        vec![flight(
            "FL-OUT",
            ACCRA,
            KUMASI,
            "2025-03-10T08:00:00Z",
            "2025-03-10T09:00:00Z",
            500,
            900,
        )],
    );
    assert_eq!(
        workflow.select_outbound("FL-OUT").unwrap(),
        OutboundSelection::NeedsReturnLeg
    );

    // the return leg searches the swapped route on the return date
    let query = workflow.return_query().unwrap();
    assert_eq!(query.from, KUMASI);
    assert_eq!(query.to, ACCRA);
    assert_eq!(query.date, "2025-03-14".parse().unwrap());

    let ticket = workflow.begin_return_search().unwrap();
    workflow.apply_return_results(
        ticket,
        vec![flight(
            "FL-RTN",
            KUMASI,
            ACCRA,
            "2025-03-14T17:00:00Z",
            "2025-03-14T18:00:00Z",
            600,
            1100,
        )],
    );
    workflow.select_return("FL-RTN").unwrap();

    let draft = workflow.draft().unwrap();
    assert_eq!(draft.trip_type, TripType::RoundTrip);
    assert_eq!(draft.outbound.amount, Decimal::from(1000));
    assert_eq!(draft.return_leg.as_ref().unwrap().amount, Decimal::from(1200));
    assert_eq!(draft.total_amount, Decimal::from(2200));
}

#[test]
fn test_stale_search_results_are_dropped() {
    let mut workflow = BookingWorkflow::new(one_way_criteria(1)).unwrap();

    let first = workflow.begin_outbound_search();
    let second = workflow.begin_outbound_search();

    let newer = vec![flight(
        "FL-NEW",
        ACCRA,
        KUMASI,
        "2025-03-10T12:00:00Z",
        "2025-03-10T13:00:00Z",
        450,
        800,
    )];
    assert!(workflow.apply_outbound_results(second, newer));

    // the older request resolves late; its results must not win
    let older = vec![flight(
        "FL-OLD",
        ACCRA,
        KUMASI,
        "2025-03-10T06:00:00Z",
        "2025-03-10T07:00:00Z",
        500,
        900,
    )];
    assert!(!workflow.apply_outbound_results(first, older));

    let shown = workflow.outbound_results().unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "FL-NEW");
}

#[test]
fn test_return_search_requires_outbound_selection() {
    let mut workflow = BookingWorkflow::new(round_trip_criteria(1)).unwrap();
    match workflow.begin_return_search() {
        Err(AppError::Workflow { .. }) => {}
        other => panic!("expected workflow error, got {other:?}"),
    }
}

#[test]
fn test_stage_accessors_guard_missing_precursor_state() {
    let workflow = BookingWorkflow::new(one_way_criteria(1)).unwrap();
    assert!(matches!(workflow.draft(), Err(AppError::Workflow { .. })));
    assert!(matches!(
        workflow.awaiting_booking(),
        Err(AppError::Workflow { .. })
    ));
    assert!(matches!(
        workflow.confirmed_booking(),
        Err(AppError::Workflow { .. })
    ));
}

#[test]
fn test_persisting_advances_straight_to_payment() {
    let workflow = awaiting_one_way_workflow(2);
    let booking = workflow.awaiting_booking().unwrap();
    assert_eq!(booking.id, "BK-1");
    assert_eq!(booking.total_amount, Decimal::from(1000));
    assert_eq!(workflow.stage().name(), "awaiting payment");
}

#[test]
fn test_confirmation_mints_missing_round_trip_ticket_numbers() {
    let mut workflow = BookingWorkflow::new(round_trip_criteria(2)).unwrap();
    let ticket = workflow.begin_outbound_search();
    workflow.apply_outbound_results(
        ticket,
        vec![flight(
            "FL-OUT",
            ACCRA,
            KUMASI,
            "2025-03-10T08:00:00Z",
            "2025-03-10T09:00:00Z",
            500,
            900,
        )],
    );
    workflow.select_outbound("FL-OUT").unwrap();
    let ticket = workflow.begin_return_search().unwrap();
    workflow.apply_return_results(
        ticket,
        vec![flight(
            "FL-RTN",
            KUMASI,
            ACCRA,
            "2025-03-14T17:00:00Z",
            "2025-03-14T18:00:00Z",
            600,
            1100,
        )],
    );
    workflow.select_return("FL-RTN").unwrap();

    let pending = booking_from_json(serde_json::json!({
        "_id": "BK-2",
        "isRoundTrip": true,
        "outboundFlight": flight_json(
            "FL-OUT", ACCRA, KUMASI,
            "2025-03-10T08:00:00Z", "2025-03-10T09:00:00Z", 500, 900,
        ),
        "returnFlight": flight_json(
            "FL-RTN", KUMASI, ACCRA,
            "2025-03-14T17:00:00Z", "2025-03-14T18:00:00Z", 600, 1100,
        ),
        "seatClass": "economy",
        "passengers": 2,
        "totalAmount": 2200,
        "status": "pending",
    }));
    workflow.booking_persisted(pending).unwrap();

    // the backend confirms but forgets the ticket numbers
    let confirmed = booking_from_json(serde_json::json!({
        "_id": "BK-2",
        "isRoundTrip": true,
        "outboundFlight": flight_json(
            "FL-OUT", ACCRA, KUMASI,
            "2025-03-10T08:00:00Z", "2025-03-10T09:00:00Z", 500, 900,
        ),
        "returnFlight": flight_json(
            "FL-RTN", KUMASI, ACCRA,
            "2025-03-14T17:00:00Z", "2025-03-14T18:00:00Z", 600, 1100,
        ),
        "seatClass": "economy",
        "passengers": 2,
        "totalAmount": 2200,
        "status": "confirmed",
    }));
    workflow.payment_confirmed(confirmed).unwrap();

    let booking = workflow.confirmed_booking().unwrap();
    let outbound = booking.outbound().ticket_number.as_deref().unwrap();
    let return_ticket = booking.return_leg().unwrap().ticket_number.as_deref().unwrap();
    assert!(!outbound.is_empty());
    assert!(!return_ticket.is_empty());
    assert_ne!(outbound, return_ticket);
    assert!(outbound.starts_with("LJ") && outbound.ends_with("OUT"));
    assert!(return_ticket.starts_with("LJ") && return_ticket.ends_with("RTN"));
}

#[test]
fn test_confirmation_keeps_backend_ticket_numbers() {
    let mut workflow = awaiting_one_way_workflow(2);
    let confirmed = booking_from_json(serde_json::json!({
        "_id": "BK-1",
        "flight": flight_json(
            "FL-100", ACCRA, KUMASI,
            "2025-03-10T08:00:00Z", "2025-03-10T09:00:00Z", 500, 900,
        ),
        "ticketNumber": "LJ17000000000000",
        "seatClass": "economy",
        "passengers": 2,
        "totalAmount": 1000,
        "status": "confirmed",
    }));
    workflow.payment_confirmed(confirmed).unwrap();
    assert_eq!(
        workflow.confirmed_booking().unwrap().reference(),
        Some("LJ17000000000000")
    );
}

#[test]
fn test_round_trip_ticket_renders_both_legs_and_the_combined_total() {
    let booking = booking_from_json(serde_json::json!({
        "_id": "BK-3",
        "isRoundTrip": true,
        "outboundFlight": flight_json(
            "FL-OUT", ACCRA, KUMASI,
            "2025-03-10T08:00:00Z", "2025-03-10T09:00:00Z", 500, 900,
        ),
        "returnFlight": flight_json(
            "FL-RTN", KUMASI, ACCRA,
            "2025-03-14T17:00:00Z", "2025-03-14T18:00:00Z", 600, 1100,
        ),
        "outboundTicketNumber": "LJ1700000000000OUT",
        "returnTicketNumber": "LJ1700000000000RTN",
        "seatClass": "economy",
        "passengers": 2,
        "totalAmount": 2200,
        "status": "confirmed",
    }));

    let rendered = lejet_booking::views::ticket::render_ticket(&booking);
    assert!(rendered.contains("Outbound Flight"));
    assert!(rendered.contains("Return Flight"));
    assert!(rendered.contains("LJ1700000000000OUT"));
    assert!(rendered.contains("LJ1700000000000RTN"));
    assert!(rendered.contains("Passengers: 2"));
    assert!(rendered.contains("Total Amount: GH₵2,200"));
    // reference on the header is the outbound leg's ticket
    assert!(rendered.contains("Booking Reference: LJ1700000000000OUT"));
}

#[test]
fn test_cancellation_eligibility_boundary() {
    let departure = utc("2025-01-10T10:00:00Z");
    assert!(can_cancel(departure, utc("2025-01-10T08:30:00Z")));
    assert!(!can_cancel(departure, utc("2025-01-10T09:30:00Z")));
    // exactly one hour out is already too late
    assert!(!can_cancel(departure, utc("2025-01-10T09:00:00Z")));
}

#[test]
fn test_payment_cannot_be_confirmed_twice() {
    let mut workflow = awaiting_one_way_workflow(1);
    let confirmed = booking_from_json(pending_booking_json(
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
        1,
        500,
    ));
    workflow.payment_confirmed(confirmed.clone()).unwrap();
    assert!(matches!(
        workflow.payment_confirmed(confirmed),
        Err(AppError::Workflow { .. })
    ));
}
