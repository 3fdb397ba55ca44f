use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::api::ApiClient;
use crate::models::booking::Booking;
use crate::models::flight::Flight;
use crate::services::workflow::BookingWorkflow;
use crate::utils::error::{AppError, AppResult};

pub const CANCEL_CUTOFF_MESSAGE: &str =
    "Bookings can only be cancelled at least 1 hour before departure";

/// Cancellation eligibility: strictly more than one hour to departure.
pub fn can_cancel(departure: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    departure - now > Duration::hours(1)
}

/// Search and booking operations around a `BookingWorkflow`.
pub struct BookingService {
    client: ApiClient,
}

impl BookingService {
    pub fn new(client: ApiClient) -> Self {
        BookingService { client }
    }

    /// Run the outbound search for the workflow's criteria. Results land in
    /// the workflow unless a newer search superseded this one meanwhile.
    pub async fn search_outbound(&self, workflow: &mut BookingWorkflow) -> AppResult<()> {
        let ticket = workflow.begin_outbound_search();
        let flights = self
            .client
            .search_flights(&workflow.criteria().outbound_query())
            .await?;
        workflow.apply_outbound_results(ticket, flights);
        Ok(())
    }

    /// Run the return-leg search (swapped route, return date). Only valid
    /// once an outbound flight has been selected.
    pub async fn search_return(&self, workflow: &mut BookingWorkflow) -> AppResult<()> {
        let query = workflow.return_query()?;
        let ticket = workflow.begin_return_search()?;
        let flights = self.client.search_flights(&query).await?;
        workflow.apply_return_results(ticket, flights);
        Ok(())
    }

    /// Submit the draft for persistence. On failure the workflow keeps the
    /// draft untouched so the user can retry or walk away.
    pub async fn confirm_draft(&self, workflow: &mut BookingWorkflow) -> AppResult<()> {
        let request = workflow.create_booking_request()?;
        let booking = self.client.create_booking(&request).await?;
        info!(booking_id = %booking.id, status = %booking.status, "booking persisted");
        workflow.booking_persisted(booking)
    }

    /// Re-resolve a booking by identifier, e.g. when the ticket screen is
    /// entered directly without a live workflow.
    pub async fn booking_by_id(&self, booking_id: &str) -> AppResult<Booking> {
        self.client.get_booking(booking_id).await
    }

    /// Fresh flight details for the confirmation screen; search results may
    /// have gone stale while the user was deciding.
    pub async fn flight_by_id(&self, flight_id: &str) -> AppResult<Flight> {
        self.client.get_flight(flight_id).await
    }

    pub async fn my_bookings(&self) -> AppResult<Vec<Booking>> {
        self.client.user_bookings().await
    }

    /// Cancel a persisted booking. Ineligible bookings are refused here,
    /// before any request is made.
    pub async fn cancel(&self, booking: &Booking) -> AppResult<()> {
        if !can_cancel(booking.departure_time(), Utc::now()) {
            return Err(AppError::Validation(CANCEL_CUTOFF_MESSAGE.into()));
        }
        self.client.cancel_booking(&booking.id).await?;
        info!(booking_id = %booking.id, "booking cancelled");
        Ok(())
    }
}
