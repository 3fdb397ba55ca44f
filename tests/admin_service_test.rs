use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::json;
use test_context::{test_context, AsyncTestContext};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use lejet_booking::models::flight::{DayOfWeek, NewAirplaneRequest};
use lejet_booking::services::admin::{
    resolve_single_schedule, AdminService, RecurringFlightForm, SingleFlightForm,
};
use lejet_booking::utils::error::AppError;
use lejet_booking::views::report::monthly_report;

mod common {
    pub mod test_utils;
}
use common::test_utils::{TestBackend, ACCRA, KUMASI};

struct AdminServiceContext {
    backend: TestBackend,
    service: AdminService,
}

#[async_trait]
impl AsyncTestContext for AdminServiceContext {
    async fn setup() -> Self {
        let backend = TestBackend::start().await;
        let service = AdminService::new(backend.client.clone());
        AdminServiceContext { backend, service }
    }
}

fn single_form(date: &str, departs: &str, arrives: &str) -> SingleFlightForm {
    SingleFlightForm {
        airplane_id: "AP-1".into(),
        from: ACCRA.into(),
        to: KUMASI.into(),
        date: date.parse().unwrap(),
        departure_time: NaiveTime::parse_from_str(departs, "%H:%M").unwrap(),
        arrival_time: NaiveTime::parse_from_str(arrives, "%H:%M").unwrap(),
        economy_price: Decimal::from(500),
        first_class_price: Decimal::from(900),
    }
}

#[test]
fn test_single_schedule_rejects_past_departures() {
    let form = single_form("2025-03-10", "08:00", "09:00");
    let now = "2025-03-10T08:30:00Z".parse().unwrap();
    match resolve_single_schedule(&form, now) {
        Err(AppError::Validation(message)) => {
            assert_eq!(message, "Departure time must be in the future")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_single_schedule_accepts_future_departures() -> anyhow::Result<()> {
    let form = single_form("2025-03-10", "08:00", "09:15");
    let now = "2025-03-09T12:00:00Z".parse()?;
    let (departure, arrival) = resolve_single_schedule(&form, now)?;
    assert_eq!(departure.to_rfc3339(), "2025-03-10T08:00:00+00:00");
    assert_eq!(arrival.to_rfc3339(), "2025-03-10T09:15:00+00:00");
    Ok(())
}

#[test]
fn test_overnight_arrival_rolls_to_the_next_day() -> anyhow::Result<()> {
    // lands before it takes off on the clock, so it lands tomorrow
    let form = single_form("2025-03-10", "23:30", "00:45");
    let now = "2025-03-09T12:00:00Z".parse()?;
    let (departure, arrival) = resolve_single_schedule(&form, now)?;
    assert!(arrival > departure);
    assert_eq!(arrival.to_rfc3339(), "2025-03-11T00:45:00+00:00");
    Ok(())
}

#[test_context(AdminServiceContext)]
#[tokio::test]
async fn test_recurring_flight_requires_weekdays(ctx: &AdminServiceContext) {
    Mock::given(method("POST"))
        .and(path("/api/admin/flights"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.backend.server)
        .await;

    let form = RecurringFlightForm {
        airplane_id: "AP-1".into(),
        from: ACCRA.into(),
        to: KUMASI.into(),
        departure_time: NaiveTime::parse_from_str("06:30", "%H:%M").unwrap(),
        arrival_time: NaiveTime::parse_from_str("07:30", "%H:%M").unwrap(),
        days: Vec::new(),
        start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        economy_price: Decimal::from(500),
        first_class_price: Decimal::from(900),
    };
    match ctx.service.schedule_recurring_flight(form).await {
        Err(AppError::Validation(message)) => {
            assert_eq!(message, "Please fill in all recurring flight details")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test_context(AdminServiceContext)]
#[tokio::test]
async fn test_recurring_flight_posts_the_window_and_days(ctx: &AdminServiceContext) {
    Mock::given(method("POST"))
        .and(path("/api/admin/flights"))
        .and(body_partial_json(json!({
            "airplaneId": "AP-1",
            "isRecurring": true,
            "recurringDays": ["Monday", "Friday"],
            "departureTime": "06:30",
            "arrivalTime": "07:30",
            "startDate": "2025-04-01",
            "endDate": "2025-06-30",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&ctx.backend.server)
        .await;

    let form = RecurringFlightForm {
        airplane_id: "AP-1".into(),
        from: ACCRA.into(),
        to: KUMASI.into(),
        departure_time: NaiveTime::parse_from_str("06:30", "%H:%M").unwrap(),
        arrival_time: NaiveTime::parse_from_str("07:30", "%H:%M").unwrap(),
        days: vec![DayOfWeek::Monday, DayOfWeek::Friday],
        start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        economy_price: Decimal::from(500),
        first_class_price: Decimal::from(900),
    };
    ctx.service.schedule_recurring_flight(form).await.unwrap();
}

#[test_context(AdminServiceContext)]
#[tokio::test]
async fn test_add_airplane_validates_before_posting(ctx: &AdminServiceContext) {
    Mock::given(method("POST"))
        .and(path("/api/admin/airplanes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.backend.server)
        .await;

    let request = NewAirplaneRequest {
        name: "  ".into(),
        capacity: 150,
        current_location: ACCRA.into(),
    };
    assert!(matches!(
        ctx.service.add_airplane(request).await,
        Err(AppError::Validation(_))
    ));
}

#[test_context(AdminServiceContext)]
#[tokio::test]
async fn test_month_is_validated_before_the_report_call(ctx: &AdminServiceContext) {
    Mock::given(method("GET"))
        .and(path("/api/reports/monthly-revenue"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.backend.server)
        .await;

    assert!(matches!(
        ctx.service.monthly_revenue(13, 2025).await,
        Err(AppError::Validation(_))
    ));
}

#[test_context(AdminServiceContext)]
#[tokio::test]
async fn test_report_normalizes_row_amounts_and_derives_the_average(ctx: &AdminServiceContext) {
    Mock::given(method("GET"))
        .and(path("/api/reports/monthly-revenue"))
        .and(query_param("month", "3"))
        .and(query_param("year", "2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRevenue": 3000,
            "totalBookings": 2,
            "totalPassengers": 5,
            "economyClassBookings": 1,
            "economyClassRevenue": 1000,
            "firstClassBookings": 1,
            "firstClassRevenue": 2000,
            "bookings": [
                {
                    "ticketNumber": "LJ1700000000001",
                    "flightDetails": { "from": ACCRA, "to": KUMASI },
                    "seatClass": "economy",
                    "passengers": 2,
                    "amount": 1000,
                },
                {
                    // older rows carry totalAmount and no flight details
                    "seatClass": "firstClass",
                    "passengers": 3,
                    "totalAmount": 2000,
                },
            ],
        })))
        .mount(&ctx.backend.server)
        .await;

    let report = ctx.service.monthly_revenue(3, 2025).await.unwrap();
    assert_eq!(report.average_revenue_per_booking(), Decimal::from(1500));
    assert_eq!(report.bookings[0].amount(), Decimal::from(1000));
    assert_eq!(report.bookings[1].amount(), Decimal::from(2000));
    assert_eq!(report.bookings[1].route(), "N/A -> N/A");

    let rendered = monthly_report(&report, 3, 2025);
    assert!(rendered.contains("March 2025"));
    assert!(rendered.contains("GH₵3,000"));
    assert!(rendered.contains("GH₵1,500"));
}
