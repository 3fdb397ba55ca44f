use std::fmt::Write as _;
use std::io;

use rust_decimal::Decimal;

use crate::models::booking::{Booking, TicketLeg};
use crate::views::format;

const RULE: &str = "============================================================";
const DASHED: &str = "------------------------------------------------------------";

fn leg_block(title: &str, leg: &TicketLeg) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "Ticket: {}",
        leg.ticket_number.as_deref().unwrap_or("N/A")
    );
    let _ = writeln!(out, "Flight: {}", leg.flight.airplane_label());
    let _ = writeln!(out, "From:   {}", leg.flight.from);
    let _ = writeln!(out, "To:     {}", leg.flight.to);
    let _ = writeln!(
        out,
        "Departure: {}",
        format::long_datetime(leg.flight.departure_time)
    );
    let _ = writeln!(
        out,
        "Arrival:   {}",
        format::long_datetime(leg.flight.arrival_time)
    );
    out
}

/// The full ticket document for a finalized booking. Pure rendering; the
/// booking must already be resolved by the caller.
pub fn render_ticket(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "LEJET Airlines - Electronic Ticket");
    let _ = writeln!(
        out,
        "Booking Reference: {}",
        booking.reference().unwrap_or("N/A")
    );
    let _ = writeln!(out, "{RULE}");

    match booking.return_leg() {
        None => {
            out.push_str(&leg_block("One Way Flight", booking.outbound()));
        }
        Some(return_leg) => {
            out.push_str(&leg_block("Outbound Flight", booking.outbound()));
            let _ = writeln!(out, "{DASHED}");
            out.push_str(&leg_block("Return Flight", return_leg));
        }
    }

    let _ = writeln!(out, "{DASHED}");
    let _ = writeln!(out, "Passenger Information");
    let _ = writeln!(out, "Class:      {}", booking.seat_class);
    let _ = writeln!(out, "Passengers: {}", booking.passengers);
    let _ = writeln!(out, "Status:     {}", booking.status);

    let base = (booking.total_amount * Decimal::new(9, 1)).round_dp(2);
    let taxes = booking.total_amount - base;
    let _ = writeln!(out, "{DASHED}");
    let _ = writeln!(out, "Fare Information");
    let _ = writeln!(out, "Base Fare:    {}", format::cedi(base));
    let _ = writeln!(out, "Taxes & Fees: {}", format::cedi(taxes));
    let _ = writeln!(out, "Total Amount: {}", format::cedi(booking.total_amount));

    let _ = writeln!(out, "{DASHED}");
    let _ = writeln!(out, "Important Information:");
    let _ = writeln!(
        out,
        "- Please arrive at the airport at least 2 hours before departure"
    );
    let _ = writeln!(out, "- Valid photo ID is required for check-in");
    let _ = writeln!(
        out,
        "- Baggage allowance: 23kg for checked baggage, 7kg for carry-on"
    );
    let _ = writeln!(out, "- This ticket is non-transferable and non-refundable");
    let _ = writeln!(out, "{RULE}");
    out
}

/// Print action: the whole document goes to the writer in one piece.
pub fn print_ticket(booking: &Booking, writer: &mut impl io::Write) -> io::Result<()> {
    writer.write_all(render_ticket(booking).as_bytes())
}
