use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::api::ApiClient;
use crate::models::flight::{
    Airplane, DayOfWeek, Flight, NewAirplaneRequest, ScheduleFlightRequest,
};
use crate::models::report::MonthlyRevenueReport;
use crate::utils::error::{AppError, AppResult};

/// Admin form for a one-off flight on a concrete date.
#[derive(Debug, Clone)]
pub struct SingleFlightForm {
    pub airplane_id: String,
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub economy_price: Decimal,
    pub first_class_price: Decimal,
}

/// Admin form for a recurring flight over a validity window.
#[derive(Debug, Clone)]
pub struct RecurringFlightForm {
    pub airplane_id: String,
    pub from: String,
    pub to: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub days: Vec<DayOfWeek>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub economy_price: Decimal,
    pub first_class_price: Decimal,
}

fn check_route_and_prices(
    airplane_id: &str,
    from: &str,
    to: &str,
    economy: Decimal,
    first_class: Decimal,
) -> AppResult<()> {
    if airplane_id.trim().is_empty() {
        return Err(AppError::Validation("an airplane must be selected".into()));
    }
    if from.trim().is_empty() || to.trim().is_empty() {
        return Err(AppError::Validation("both airports are required".into()));
    }
    if from == to {
        return Err(AppError::Validation(
            "departure and arrival airports must differ".into(),
        ));
    }
    if economy <= Decimal::ZERO || first_class <= Decimal::ZERO {
        return Err(AppError::Validation("prices must be positive".into()));
    }
    Ok(())
}

/// Resolve the concrete departure/arrival instants of a single flight.
/// An arrival clock time earlier than departure rolls to the next day.
pub fn resolve_single_schedule(
    form: &SingleFlightForm,
    now: DateTime<Utc>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let departure = form.date.and_time(form.departure_time).and_utc();
    let mut arrival = form.date.and_time(form.arrival_time).and_utc();
    if arrival <= departure {
        arrival += Duration::days(1);
    }
    if departure <= now {
        return Err(AppError::Validation(
            "Departure time must be in the future".into(),
        ));
    }
    Ok((departure, arrival))
}

/// Administrative flight and fleet management plus revenue reporting.
/// Every call requires an admin credential; the backend enforces the role
/// and a rejection surfaces as a forced re-authentication.
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        AdminService { client }
    }

    pub async fn airplanes(&self) -> AppResult<Vec<Airplane>> {
        self.client.admin_airplanes().await
    }

    pub async fn add_airplane(&self, request: NewAirplaneRequest) -> AppResult<()> {
        if request.name.trim().is_empty() || request.current_location.trim().is_empty() {
            return Err(AppError::Validation(
                "airplane name and current location are required".into(),
            ));
        }
        if request.capacity == 0 {
            return Err(AppError::Validation("capacity must be at least 1".into()));
        }
        self.client.add_airplane(&request).await?;
        info!(name = %request.name, "airplane added");
        Ok(())
    }

    pub async fn flights(&self) -> AppResult<Vec<Flight>> {
        self.client.admin_flights().await
    }

    pub async fn schedule_single_flight(&self, form: SingleFlightForm) -> AppResult<()> {
        check_route_and_prices(
            &form.airplane_id,
            &form.from,
            &form.to,
            form.economy_price,
            form.first_class_price,
        )?;
        let (departure, arrival) = resolve_single_schedule(&form, Utc::now())?;
        let request = ScheduleFlightRequest {
            airplane_id: form.airplane_id,
            from: form.from,
            to: form.to,
            departure_time: departure.to_rfc3339(),
            arrival_time: arrival.to_rfc3339(),
            economy_price: form.economy_price,
            first_class_price: form.first_class_price,
            is_recurring: false,
            recurring_days: None,
            start_date: None,
            end_date: None,
        };
        self.client.schedule_flight(&request).await?;
        info!(from = %request.from, to = %request.to, "flight scheduled");
        Ok(())
    }

    pub async fn schedule_recurring_flight(&self, form: RecurringFlightForm) -> AppResult<()> {
        check_route_and_prices(
            &form.airplane_id,
            &form.from,
            &form.to,
            form.economy_price,
            form.first_class_price,
        )?;
        if form.days.is_empty() {
            return Err(AppError::Validation(
                "Please fill in all recurring flight details".into(),
            ));
        }
        if form.end_date < form.start_date {
            return Err(AppError::Validation(
                "the recurrence window must end on or after its start".into(),
            ));
        }
        let request = ScheduleFlightRequest {
            airplane_id: form.airplane_id,
            from: form.from,
            to: form.to,
            departure_time: form.departure_time.format("%H:%M").to_string(),
            arrival_time: form.arrival_time.format("%H:%M").to_string(),
            economy_price: form.economy_price,
            first_class_price: form.first_class_price,
            is_recurring: true,
            recurring_days: Some(form.days),
            start_date: Some(form.start_date),
            end_date: Some(form.end_date),
        };
        self.client.schedule_flight(&request).await?;
        info!(from = %request.from, to = %request.to, "recurring flight scheduled");
        Ok(())
    }

    pub async fn monthly_revenue(&self, month: u32, year: i32) -> AppResult<MonthlyRevenueReport> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(
                "month must be between 1 and 12".into(),
            ));
        }
        self.client.monthly_revenue(month, year).await
    }
}
