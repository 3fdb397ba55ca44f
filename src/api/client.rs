use std::sync::{Arc, RwLock};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::models::booking::{
    Booking, BookingEnvelope, BookingWire, CreateBookingRequest,
};
use crate::models::flight::{
    Airplane, Flight, FlightQuery, FlightSearchPayload, NewAirplaneRequest,
    ScheduleFlightRequest,
};
use crate::models::payment::PaymentRequest;
use crate::models::report::MonthlyRevenueReport;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::utils::error::{AppError, AppResult};

// Backends disagree on the error field name; take whichever is present.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the booking backend. Cheap to clone; the bearer
/// credential is shared between clones so the session layer can swap it.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: Client::new(),
            base_url: base_url.into(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| AppError::Decode(e.to_string()));
        }
        let message = Self::error_message(response).await;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Auth(message)),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(message)),
            _ => Err(AppError::Api(message)),
        }
    }

    async fn handle_no_content(response: Response) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = Self::error_message(response).await;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Auth(message)),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(message)),
            _ => Err(AppError::Api(message)),
        }
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body
                .message
                .or(body.error)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        }
    }

    // --- flights ---

    /// `GET /api/flights/search` (unauthenticated). The date travels as the
    /// UTC midnight instant of the chosen day.
    pub async fn search_flights(&self, query: &FlightQuery) -> AppResult<Vec<Flight>> {
        debug!(from = %query.from, to = %query.to, date = %query.date, "searching flights");
        let date = query.departure_instant().to_rfc3339();
        let response = self
            .http
            .get(self.url("/api/flights/search"))
            .query(&[
                ("from", query.from.as_str()),
                ("to", query.to.as_str()),
                ("date", date.as_str()),
            ])
            .send()
            .await?;
        let payload: FlightSearchPayload = Self::handle(response).await?;
        Ok(payload.into_flights())
    }

    pub async fn get_flight(&self, flight_id: &str) -> AppResult<Flight> {
        let response = self
            .authed(self.http.get(self.url(&format!("/api/flights/{flight_id}"))))
            .send()
            .await?;
        Self::handle(response).await
    }

    // --- bookings ---

    pub async fn create_booking(&self, request: &CreateBookingRequest) -> AppResult<Booking> {
        debug!(flight_id = %request.flight_id, "creating booking");
        let response = self
            .authed(self.http.post(self.url("/api/bookings")))
            .json(request)
            .send()
            .await?;
        let envelope: BookingEnvelope = Self::handle(response).await?;
        envelope.booking.try_into()
    }

    pub async fn confirm_payment(&self, request: &PaymentRequest) -> AppResult<Booking> {
        debug!(booking_id = %request.booking_id, method = %request.payment_method, "confirming payment");
        let response = self
            .authed(self.http.post(self.url("/api/bookings/confirm-payment")))
            .json(request)
            .send()
            .await?;
        let envelope: BookingEnvelope = Self::handle(response).await?;
        envelope.booking.try_into()
    }

    pub async fn get_booking(&self, booking_id: &str) -> AppResult<Booking> {
        let response = self
            .authed(
                self.http
                    .get(self.url(&format!("/api/bookings/{booking_id}"))),
            )
            .send()
            .await?;
        let wire: BookingWire = Self::handle(response).await?;
        wire.try_into()
    }

    /// All bookings of the calling user. Rows the backend serves without a
    /// flight attached are dropped with a warning rather than failing the
    /// whole dashboard.
    pub async fn user_bookings(&self) -> AppResult<Vec<Booking>> {
        let response = self
            .authed(self.http.get(self.url("/api/bookings/user/bookings")))
            .send()
            .await?;
        let rows: Vec<BookingWire> = Self::handle(response).await?;
        Ok(rows
            .into_iter()
            .filter_map(|wire| {
                let id = wire.id.clone();
                match Booking::try_from(wire) {
                    Ok(booking) => Some(booking),
                    Err(e) => {
                        warn!(booking_id = %id, error = %e, "skipping malformed booking row");
                        None
                    }
                }
            })
            .collect())
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> AppResult<()> {
        let response = self
            .authed(
                self.http
                    .delete(self.url(&format!("/api/bookings/{booking_id}/cancel"))),
            )
            .send()
            .await?;
        Self::handle_no_content(response).await
    }

    // --- identity ---

    pub async fn verify(&self) -> AppResult<User> {
        let response = self
            .authed(self.http.get(self.url("/api/users/verify")))
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let response = self
            .http
            .post(self.url("/api/users/login"))
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        let response = self
            .http
            .post(self.url("/api/users/register"))
            .json(request)
            .send()
            .await?;
        Self::handle_no_content(response).await
    }

    // --- administration ---

    pub async fn admin_airplanes(&self) -> AppResult<Vec<Airplane>> {
        let response = self
            .authed(self.http.get(self.url("/api/admin/airplanes")))
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn add_airplane(&self, request: &NewAirplaneRequest) -> AppResult<()> {
        let response = self
            .authed(self.http.post(self.url("/api/admin/airplanes")))
            .json(request)
            .send()
            .await?;
        Self::handle_no_content(response).await
    }

    pub async fn admin_flights(&self) -> AppResult<Vec<Flight>> {
        let response = self
            .authed(self.http.get(self.url("/api/admin/flights")))
            .send()
            .await?;
        Self::handle(response).await
    }

    pub async fn schedule_flight(&self, request: &ScheduleFlightRequest) -> AppResult<()> {
        let response = self
            .authed(self.http.post(self.url("/api/admin/flights")))
            .json(request)
            .send()
            .await?;
        Self::handle_no_content(response).await
    }

    pub async fn monthly_revenue(&self, month: u32, year: i32) -> AppResult<MonthlyRevenueReport> {
        let response = self
            .authed(self.http.get(self.url("/api/reports/monthly-revenue")))
            .query(&[("month", month.to_string()), ("year", year.to_string())])
            .send()
            .await?;
        Self::handle(response).await
    }

    // --- feedback ---

    pub async fn send_feedback(&self, feedback: &str) -> AppResult<()> {
        let response = self
            .http
            .post(self.url("/api/feedback"))
            .json(&json!({ "feedback": feedback }))
            .send()
            .await?;
        Self::handle_no_content(response).await
    }
}
