use std::fmt::Write as _;

use crate::models::report::MonthlyRevenueReport;
use crate::views::format;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Plain-table rendering of the monthly revenue report. All figures come
/// from the backend (plus the derived average); nothing is fabricated.
pub fn monthly_report(report: &MonthlyRevenueReport, month: u32, year: i32) -> String {
    let month_name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown");

    let mut out = String::new();
    let _ = writeln!(out, "Monthly Booking Report - {month_name} {year}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Revenue:        {}", format::cedi(report.total_revenue));
    let _ = writeln!(out, "Total Bookings:       {}", report.total_bookings);
    let _ = writeln!(out, "Total Passengers:     {}", report.total_passengers);
    let _ = writeln!(
        out,
        "Avg Revenue/Booking:  {}",
        format::cedi(report.average_revenue_per_booking())
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Economy:     {} bookings, revenue {}",
        report.economy_class_bookings,
        format::cedi(report.economy_class_revenue)
    );
    let _ = writeln!(
        out,
        "First Class: {} bookings, revenue {}",
        report.first_class_bookings,
        format::cedi(report.first_class_revenue)
    );

    if !report.bookings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<24} {:<40} {:<12} {:>10} {:>14}",
            "Ticket Number", "Flight", "Class", "Passengers", "Amount"
        );
        for row in &report.bookings {
            let _ = writeln!(
                out,
                "{:<24} {:<40} {:<12} {:>10} {:>14}",
                row.ticket_number.as_deref().unwrap_or("N/A"),
                row.route(),
                row.seat_class.to_string(),
                row.passengers,
                format::cedi(row.amount())
            );
        }
    }
    out
}
