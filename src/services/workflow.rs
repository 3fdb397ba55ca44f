use chrono::NaiveDate;
use tracing::debug;
use validator::Validate;

use crate::models::booking::{
    Booking, BookingDraft, CreateBookingRequest, DraftLeg, TripType,
};
use crate::models::flight::{Flight, FlightQuery, SeatClass};
use crate::services::fare::compute_fare;
use crate::utils::error::{AppError, AppResult};

/// What the traveler asked for before any search was issued.
#[derive(Debug, Clone, Validate)]
pub struct SearchCriteria {
    pub trip_type: TripType,
    #[validate(length(min = 1, message = "departure airport is required"))]
    pub from: String,
    #[validate(length(min = 1, message = "arrival airport is required"))]
    pub to: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 9, message = "passengers must be between 1 and 9"))]
    pub passengers: u32,
    pub seat_class: SeatClass,
}

impl SearchCriteria {
    fn check(&self) -> AppResult<()> {
        self.validate()?;
        if self.from == self.to {
            return Err(AppError::Validation(
                "departure and arrival airports must differ".into(),
            ));
        }
        if self.trip_type == TripType::RoundTrip {
            match self.return_date {
                None => {
                    return Err(AppError::Validation(
                        "a return date is required for round trips".into(),
                    ))
                }
                Some(date) if date < self.departure_date => {
                    return Err(AppError::Validation(
                        "return date cannot be before the departure date".into(),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn outbound_query(&self) -> FlightQuery {
        FlightQuery {
            from: self.from.clone(),
            to: self.to.clone(),
            date: self.departure_date,
        }
    }
}

/// Where the booking stands. `RETURN_SELECTED` from the flow description
/// collapses into `Drafted`: building the round-trip draft from a return
/// selection is immediate and cannot fail, so the state between the two is
/// never observable.
#[derive(Debug)]
pub enum WorkflowStage {
    Searching,
    OutboundSelected { outbound: Flight },
    Drafted { draft: BookingDraft },
    PendingPersisted { booking: Booking },
    AwaitingPayment { booking: Booking },
    Confirmed { booking: Booking },
    Cancelled { booking: Booking },
}

impl WorkflowStage {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowStage::Searching => "searching",
            WorkflowStage::OutboundSelected { .. } => "selecting the return leg",
            WorkflowStage::Drafted { .. } => "reviewing a draft",
            WorkflowStage::PendingPersisted { .. } => "persisting the booking",
            WorkflowStage::AwaitingPayment { .. } => "awaiting payment",
            WorkflowStage::Confirmed { .. } => "holding a confirmed booking",
            WorkflowStage::Cancelled { .. } => "holding a cancelled booking",
        }
    }
}

/// Which search a result set answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchLeg {
    Outbound,
    Return,
}

/// Handed out when a search is issued; results are only accepted when they
/// present the ticket of the most recent request for that leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    leg: SearchLeg,
    seq: u64,
}

/// Outcome of choosing an outbound flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundSelection {
    /// One-way: the draft is ready for confirmation.
    DraftReady,
    /// Round trip: a return-leg search is needed next.
    NeedsReturnLeg,
}

/// The in-progress booking, threaded between the search, confirmation,
/// payment and ticket screens. Dropping the value is the navigate-away
/// discard; nothing here survives a restart.
#[derive(Debug)]
pub struct BookingWorkflow {
    criteria: SearchCriteria,
    stage: WorkflowStage,
    outbound_results: Option<Vec<Flight>>,
    return_results: Option<Vec<Flight>>,
    outbound_seq: u64,
    return_seq: u64,
}

impl BookingWorkflow {
    /// Entering the flow requires valid criteria; nothing is searched yet.
    pub fn new(criteria: SearchCriteria) -> AppResult<Self> {
        criteria.check()?;
        Ok(BookingWorkflow {
            criteria,
            stage: WorkflowStage::Searching,
            outbound_results: None,
            return_results: None,
            outbound_seq: 0,
            return_seq: 0,
        })
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn stage(&self) -> &WorkflowStage {
        &self.stage
    }

    fn misuse(&self, action: &'static str) -> AppError {
        AppError::Workflow {
            stage: self.stage.name(),
            action,
        }
    }

    /// The return-leg query: swapped route on the return date.
    pub fn return_query(&self) -> AppResult<FlightQuery> {
        let return_date = self
            .criteria
            .return_date
            .ok_or_else(|| AppError::Validation("a return date is required for round trips".into()))?;
        Ok(self.criteria.outbound_query().swapped(return_date))
    }

    // --- search sequencing ---

    /// Issue a fresh outbound search. Any selection in progress is thrown
    /// away and pending results of older searches become stale.
    pub fn begin_outbound_search(&mut self) -> SearchTicket {
        self.outbound_seq += 1;
        self.return_seq += 1;
        self.stage = WorkflowStage::Searching;
        self.outbound_results = None;
        self.return_results = None;
        SearchTicket {
            leg: SearchLeg::Outbound,
            seq: self.outbound_seq,
        }
    }

    /// Accept outbound results if they answer the newest request; stale
    /// responses are dropped so they can never overwrite fresher ones.
    pub fn apply_outbound_results(&mut self, ticket: SearchTicket, flights: Vec<Flight>) -> bool {
        if ticket.leg != SearchLeg::Outbound || ticket.seq != self.outbound_seq {
            debug!(seq = ticket.seq, current = self.outbound_seq, "dropping stale outbound results");
            return false;
        }
        self.outbound_results = Some(flights);
        true
    }

    pub fn outbound_results(&self) -> Option<&[Flight]> {
        self.outbound_results.as_deref()
    }

    pub fn begin_return_search(&mut self) -> AppResult<SearchTicket> {
        if !matches!(self.stage, WorkflowStage::OutboundSelected { .. }) {
            return Err(self.misuse("search return flights"));
        }
        self.return_seq += 1;
        self.return_results = None;
        Ok(SearchTicket {
            leg: SearchLeg::Return,
            seq: self.return_seq,
        })
    }

    pub fn apply_return_results(&mut self, ticket: SearchTicket, flights: Vec<Flight>) -> bool {
        if ticket.leg != SearchLeg::Return || ticket.seq != self.return_seq {
            debug!(seq = ticket.seq, current = self.return_seq, "dropping stale return results");
            return false;
        }
        self.return_results = Some(flights);
        true
    }

    pub fn return_results(&self) -> Option<&[Flight]> {
        self.return_results.as_deref()
    }

    // --- selection ---

    /// Choose one flight from the outbound results. One-way trips draft
    /// immediately; round trips wait for the return leg.
    pub fn select_outbound(&mut self, flight_id: &str) -> AppResult<OutboundSelection> {
        if !matches!(self.stage, WorkflowStage::Searching) {
            return Err(self.misuse("select an outbound flight"));
        }
        let flight = self
            .outbound_results
            .as_ref()
            .and_then(|flights| flights.iter().find(|f| f.id == flight_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound("selected flight is not in the results".into()))?;

        match self.criteria.trip_type {
            TripType::OneWay => {
                let fare = compute_fare(&flight, self.criteria.seat_class, self.criteria.passengers);
                let draft = BookingDraft::one_way(
                    DraftLeg {
                        flight,
                        amount: fare.total_price,
                    },
                    self.criteria.seat_class,
                    self.criteria.passengers,
                );
                self.stage = WorkflowStage::Drafted { draft };
                Ok(OutboundSelection::DraftReady)
            }
            TripType::RoundTrip => {
                self.stage = WorkflowStage::OutboundSelected { outbound: flight };
                Ok(OutboundSelection::NeedsReturnLeg)
            }
        }
    }

    /// Choose the return flight; combines both legs into the draft.
    pub fn select_return(&mut self, flight_id: &str) -> AppResult<()> {
        let return_flight = self
            .return_results
            .as_ref()
            .and_then(|flights| flights.iter().find(|f| f.id == flight_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound("selected flight is not in the results".into()))?;

        match std::mem::replace(&mut self.stage, WorkflowStage::Searching) {
            WorkflowStage::OutboundSelected { outbound } => {
                let seat_class = self.criteria.seat_class;
                let passengers = self.criteria.passengers;
                let outbound_fare = compute_fare(&outbound, seat_class, passengers);
                let return_fare = compute_fare(&return_flight, seat_class, passengers);
                let draft = BookingDraft::round_trip(
                    DraftLeg {
                        flight: outbound,
                        amount: outbound_fare.total_price,
                    },
                    DraftLeg {
                        flight: return_flight,
                        amount: return_fare.total_price,
                    },
                    seat_class,
                    passengers,
                );
                self.stage = WorkflowStage::Drafted { draft };
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.misuse("select a return flight"))
            }
        }
    }

    // --- draft, persistence, payment ---

    /// The draft under review; erroring here is the "missing precursor"
    /// signal that sends the user back to search.
    pub fn draft(&self) -> AppResult<&BookingDraft> {
        match &self.stage {
            WorkflowStage::Drafted { draft } => Ok(draft),
            _ => Err(self.misuse("review a booking draft")),
        }
    }

    pub fn create_booking_request(&self) -> AppResult<CreateBookingRequest> {
        let draft = self.draft()?;
        Ok(CreateBookingRequest {
            flight_id: draft.outbound.flight.id.clone(),
            seat_class: draft.seat_class,
            passengers: draft.passengers,
            total_amount: draft.total_amount,
        })
    }

    /// The backend allocated a pending booking for the draft. Persisting
    /// moves through `PendingPersisted` and directly on to payment.
    pub fn booking_persisted(&mut self, booking: Booking) -> AppResult<()> {
        if !matches!(self.stage, WorkflowStage::Drafted { .. }) {
            return Err(self.misuse("persist a booking"));
        }
        self.stage = WorkflowStage::PendingPersisted { booking };
        // automatic transition: nothing happens between the two
        if let WorkflowStage::PendingPersisted { booking } =
            std::mem::replace(&mut self.stage, WorkflowStage::Searching)
        {
            self.stage = WorkflowStage::AwaitingPayment { booking };
        }
        Ok(())
    }

    /// The booking a payment would settle.
    pub fn awaiting_booking(&self) -> AppResult<&Booking> {
        match &self.stage {
            WorkflowStage::AwaitingPayment { booking } => Ok(booking),
            _ => Err(self.misuse("take payment")),
        }
    }

    /// Payment went through; the finalized booking must leave here with a
    /// ticket number on every leg.
    pub fn payment_confirmed(&mut self, mut booking: Booking) -> AppResult<()> {
        if !matches!(self.stage, WorkflowStage::AwaitingPayment { .. }) {
            return Err(self.misuse("confirm payment"));
        }
        booking.ensure_ticket_numbers();
        self.stage = WorkflowStage::Confirmed { booking };
        Ok(())
    }

    pub fn confirmed_booking(&self) -> AppResult<&Booking> {
        match &self.stage {
            WorkflowStage::Confirmed { booking } => Ok(booking),
            _ => Err(self.misuse("show the ticket")),
        }
    }

    /// User cancelled the booking they just confirmed.
    pub fn mark_cancelled(&mut self) -> AppResult<()> {
        match std::mem::replace(&mut self.stage, WorkflowStage::Searching) {
            WorkflowStage::Confirmed { mut booking } => {
                booking.status = crate::models::booking::BookingStatus::Cancelled;
                self.stage = WorkflowStage::Cancelled { booking };
                Ok(())
            }
            other => {
                self.stage = other;
                Err(self.misuse("cancel the booking"))
            }
        }
    }
}
