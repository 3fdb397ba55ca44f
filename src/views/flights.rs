use std::fmt::Write;

use crate::models::flight::{Flight, SeatClass};
use crate::services::fare::compute_fare;
use crate::views::format;

const LOW_SEAT_THRESHOLD: i32 = 5;

/// One search result, priced for the searching party.
pub fn flight_card(
    index: usize,
    flight: &Flight,
    seat_class: SeatClass,
    passengers: u32,
    tag: &str,
) -> String {
    let fare = compute_fare(flight, seat_class, passengers);
    let seats = flight.seats_remaining(seat_class);
    let mut out = String::new();

    let _ = writeln!(out, "[{}] {}  ({tag})", index, flight.airplane_label());
    let _ = writeln!(out, "    {}  ->  {}", flight.from, flight.to);
    let _ = writeln!(
        out,
        "    Departure: {}",
        format::short_datetime(flight.departure_time)
    );
    let _ = writeln!(
        out,
        "    Arrival:   {}",
        format::short_datetime(flight.arrival_time)
    );
    let _ = writeln!(
        out,
        "    Price per person: {}",
        format::cedi(fare.unit_price)
    );
    let _ = writeln!(
        out,
        "    Total for {} passenger{}: {}",
        passengers,
        if passengers > 1 { "s" } else { "" },
        format::cedi(fare.total_price)
    );
    if seats < LOW_SEAT_THRESHOLD {
        let _ = writeln!(out, "    Seats left: {seats} (selling fast)");
    } else {
        let _ = writeln!(out, "    Seats left: {seats}");
    }
    out
}

/// The whole result list, or the informational empty state.
pub fn flight_list(
    flights: &[Flight],
    seat_class: SeatClass,
    passengers: u32,
    tag: &str,
) -> String {
    if flights.is_empty() {
        return "No flights available for the selected criteria\n".to_string();
    }
    let mut out = String::new();
    for (index, flight) in flights.iter().enumerate() {
        out.push_str(&flight_card(index + 1, flight, seat_class, passengers, tag));
        out.push('\n');
    }
    out
}
