use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::models::booking::{Booking, BookingDraft, BookingStatus};
use crate::services::booking::can_cancel;
use crate::views::format;

/// The confirmation screen: what is about to be booked, and for how much.
pub fn draft_summary(draft: &BookingDraft) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} booking", draft.trip_type);
    let _ = writeln!(
        out,
        "Outbound: {} -> {}, {}  ({})",
        draft.outbound.flight.from,
        draft.outbound.flight.to,
        format::short_datetime(draft.outbound.flight.departure_time),
        format::cedi(draft.outbound.amount)
    );
    if let Some(return_leg) = &draft.return_leg {
        let _ = writeln!(
            out,
            "Return:   {} -> {}, {}  ({})",
            return_leg.flight.from,
            return_leg.flight.to,
            format::short_datetime(return_leg.flight.departure_time),
            format::cedi(return_leg.amount)
        );
    }
    let _ = writeln!(out, "Class:      {}", draft.seat_class);
    let _ = writeln!(out, "Passengers: {}", draft.passengers);
    let _ = writeln!(out, "Total:      {}", format::cedi(draft.total_amount));
    out
}

/// One dashboard row per booking, with the cancellation affordance shown
/// only while the booking is still eligible.
pub fn booking_list(bookings: &[Booking], now: DateTime<Utc>) -> String {
    if bookings.is_empty() {
        return "You haven't made any bookings yet.\n".to_string();
    }
    let mut out = String::new();
    for (index, booking) in bookings.iter().enumerate() {
        let flight = &booking.outbound().flight;
        let _ = writeln!(
            out,
            "[{}] {}  ->  {}{}",
            index + 1,
            flight.from,
            flight.to,
            if booking.is_round_trip() {
                "  (round trip)"
            } else {
                ""
            }
        );
        let _ = writeln!(out, "    Flight:    {}", flight.airplane_label());
        let _ = writeln!(
            out,
            "    Departure: {}",
            format::short_datetime(flight.departure_time)
        );
        let _ = writeln!(out, "    Booking ID: {}", booking.id);
        let _ = writeln!(out, "    Class:     {}", booking.seat_class);
        let _ = writeln!(out, "    Total:     {}", format::cedi(booking.total_amount));
        let _ = writeln!(out, "    Status:    {}", booking.status);
        if booking.status != BookingStatus::Cancelled {
            if can_cancel(booking.departure_time(), now) {
                let _ = writeln!(out, "    (can be cancelled)");
            } else {
                let _ = writeln!(out, "    (past the cancellation cutoff)");
            }
        }
        out.push('\n');
    }
    out
}
