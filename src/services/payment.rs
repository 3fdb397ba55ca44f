use tracing::info;

use crate::api::ApiClient;
use crate::models::payment::{PaymentDetails, PaymentRequest};
use crate::services::workflow::BookingWorkflow;
use crate::utils::error::AppResult;

/// Collects validated payment input and settles the pending booking.
pub struct PaymentService {
    client: ApiClient,
}

impl PaymentService {
    pub fn new(client: ApiClient) -> Self {
        PaymentService { client }
    }

    /// Submit payment for the workflow's pending booking.
    ///
    /// Validation failures and precursor-state misuse return before any
    /// request is sent. A backend rejection leaves the workflow in
    /// `AwaitingPayment` so the user can resubmit; nothing is retried
    /// automatically. The details value is consumed and dropped with this
    /// call, whatever the outcome.
    pub async fn submit(
        &self,
        workflow: &mut BookingWorkflow,
        details: PaymentDetails,
    ) -> AppResult<()> {
        let booking = workflow.awaiting_booking()?;
        details.validate()?;

        let request = PaymentRequest {
            booking_id: booking.id.clone(),
            payment_method: details.method(),
            payment_details: details,
        };
        let confirmed = self.client.confirm_payment(&request).await?;
        info!(booking_id = %confirmed.id, status = %confirmed.status, "payment confirmed");
        workflow.payment_confirmed(confirmed)
    }
}
