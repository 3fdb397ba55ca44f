use rust_decimal::Decimal;

use crate::models::flight::{Flight, SeatClass};

/// Price of one booking leg for a whole party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fare {
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Pure fare derivation: the flight's stored price for the class, times the
/// passenger count. Called repeatedly during incremental selection, so it
/// must not depend on anything but its arguments.
pub fn compute_fare(flight: &Flight, seat_class: SeatClass, passengers: u32) -> Fare {
    let unit_price = flight.price(seat_class);
    Fare {
        unit_price,
        total_price: unit_price * Decimal::from(passengers),
    }
}
