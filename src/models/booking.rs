use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::models::flight::{Flight, SeatClass};
use crate::utils::error::{AppError, AppResult};
use crate::utils::ticket_number::{self, LegKind};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum BookingStatus {
    #[strum(to_string = "Pending")]
    Pending,
    #[strum(to_string = "Confirmed")]
    Confirmed,
    #[strum(to_string = "Cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TripType {
    #[strum(serialize = "one-way", to_string = "One-Way")]
    OneWay,
    #[strum(serialize = "round-trip", to_string = "Round Trip")]
    RoundTrip,
}

/// One priced leg of a draft: the chosen flight and the amount for the whole
/// party on that leg (unit price x passengers).
#[derive(Debug, Clone)]
pub struct DraftLeg {
    pub flight: Flight,
    pub amount: Decimal,
}

/// An unpersisted booking proposal, carried between the search, confirmation
/// and payment screens. Discarded whenever its workflow is dropped.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub trip_type: TripType,
    pub outbound: DraftLeg,
    pub return_leg: Option<DraftLeg>,
    pub seat_class: SeatClass,
    pub passengers: u32,
    pub total_amount: Decimal,
}

impl BookingDraft {
    pub fn one_way(outbound: DraftLeg, seat_class: SeatClass, passengers: u32) -> Self {
        let total_amount = outbound.amount;
        BookingDraft {
            trip_type: TripType::OneWay,
            outbound,
            return_leg: None,
            seat_class,
            passengers,
            total_amount,
        }
    }

    pub fn round_trip(
        outbound: DraftLeg,
        return_leg: DraftLeg,
        seat_class: SeatClass,
        passengers: u32,
    ) -> Self {
        let total_amount = outbound.amount + return_leg.amount;
        BookingDraft {
            trip_type: TripType::RoundTrip,
            outbound,
            return_leg: Some(return_leg),
            seat_class,
            passengers,
            total_amount,
        }
    }
}

/// Body of `POST /api/bookings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub flight_id: String,
    pub seat_class: SeatClass,
    pub passengers: u32,
    pub total_amount: Decimal,
}

/// A booking leg with its issued ticket number (absent until confirmation).
#[derive(Debug, Clone)]
pub struct TicketLeg {
    pub flight: Flight,
    pub ticket_number: Option<String>,
}

#[derive(Debug, Clone)]
pub enum BookingTrip {
    OneWay(TicketLeg),
    RoundTrip {
        outbound: TicketLeg,
        return_leg: TicketLeg,
    },
}

/// Canonical persisted booking, normalized from the wire shape.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    /// Owning user id; some endpoints omit it.
    pub user: Option<String>,
    pub trip: BookingTrip,
    pub seat_class: SeatClass,
    pub passengers: u32,
    pub total_amount: Decimal,
    pub status: BookingStatus,
}

impl Booking {
    pub fn is_round_trip(&self) -> bool {
        matches!(self.trip, BookingTrip::RoundTrip { .. })
    }

    /// The outbound leg (or the only leg).
    pub fn outbound(&self) -> &TicketLeg {
        match &self.trip {
            BookingTrip::OneWay(leg) => leg,
            BookingTrip::RoundTrip { outbound, .. } => outbound,
        }
    }

    pub fn return_leg(&self) -> Option<&TicketLeg> {
        match &self.trip {
            BookingTrip::OneWay(_) => None,
            BookingTrip::RoundTrip { return_leg, .. } => Some(return_leg),
        }
    }

    /// Departure instant that gates cancellation: the outbound leg's.
    pub fn departure_time(&self) -> chrono::DateTime<chrono::Utc> {
        self.outbound().flight.departure_time
    }

    /// Booking reference shown on the ticket header.
    pub fn reference(&self) -> Option<&str> {
        self.outbound().ticket_number.as_deref()
    }

    /// Ticket numbers are issued at confirmation. The backend response is
    /// authoritative; legs it left blank get client-minted numbers.
    pub fn ensure_ticket_numbers(&mut self) {
        match &mut self.trip {
            BookingTrip::OneWay(leg) => {
                if leg.ticket_number.is_none() {
                    leg.ticket_number = Some(ticket_number::mint(LegKind::Single));
                }
            }
            BookingTrip::RoundTrip {
                outbound,
                return_leg,
            } => {
                if outbound.ticket_number.is_none() {
                    outbound.ticket_number = Some(ticket_number::mint(LegKind::Outbound));
                }
                if return_leg.ticket_number.is_none() {
                    return_leg.ticket_number = Some(ticket_number::mint(LegKind::Return));
                }
            }
        }
    }
}

/// Raw booking as the backend sends it. One-way bookings carry `flight`,
/// round trips `outboundFlight`/`returnFlight`; ticket numbers appear either
/// at the top level or embedded in the leg objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWire {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub is_round_trip: Option<bool>,
    #[serde(default)]
    pub flight: Option<Flight>,
    #[serde(default)]
    pub outbound_flight: Option<Flight>,
    #[serde(default)]
    pub return_flight: Option<Flight>,
    #[serde(default)]
    pub ticket_number: Option<String>,
    #[serde(default)]
    pub outbound_ticket_number: Option<String>,
    #[serde(default)]
    pub return_ticket_number: Option<String>,
    pub seat_class: SeatClass,
    pub passengers: u32,
    pub total_amount: Decimal,
    pub status: BookingStatus,
}

/// Mutation endpoints wrap the booking: `{"booking": {...}}`.
#[derive(Debug, Deserialize)]
pub struct BookingEnvelope {
    pub booking: BookingWire,
}

impl TryFrom<BookingWire> for Booking {
    type Error = AppError;

    fn try_from(wire: BookingWire) -> AppResult<Self> {
        let round_trip = wire
            .is_round_trip
            .unwrap_or(wire.outbound_flight.is_some() && wire.return_flight.is_some());

        let trip = if round_trip {
            let outbound = wire
                .outbound_flight
                .or(wire.flight)
                .ok_or_else(|| AppError::Decode("booking is missing its outbound flight".into()))?;
            let return_flight = wire
                .return_flight
                .ok_or_else(|| AppError::Decode("booking is missing its return flight".into()))?;
            let outbound_ticket = wire
                .outbound_ticket_number
                .or_else(|| outbound.ticket_number.clone());
            let return_ticket = wire
                .return_ticket_number
                .or_else(|| return_flight.ticket_number.clone());
            BookingTrip::RoundTrip {
                outbound: TicketLeg {
                    flight: outbound,
                    ticket_number: outbound_ticket,
                },
                return_leg: TicketLeg {
                    flight: return_flight,
                    ticket_number: return_ticket,
                },
            }
        } else {
            let flight = wire
                .flight
                .or(wire.outbound_flight)
                .ok_or_else(|| AppError::Decode("booking is missing its flight".into()))?;
            let ticket = wire.ticket_number.or_else(|| flight.ticket_number.clone());
            BookingTrip::OneWay(TicketLeg {
                flight,
                ticket_number: ticket,
            })
        };

        Ok(Booking {
            id: wire.id,
            user: wire.user,
            trip,
            seat_class: wire.seat_class,
            passengers: wire.passengers,
            total_amount: wire.total_amount,
            status: wire.status,
        })
    }
}
