use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::flight::SeatClass;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFlightDetails {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBookingRow {
    #[serde(default)]
    pub ticket_number: Option<String>,
    #[serde(default)]
    pub flight_details: ReportFlightDetails,
    pub seat_class: SeatClass,
    pub passengers: u32,
    // Some backend versions name the field `amount`, others `totalAmount`
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

impl ReportBookingRow {
    pub fn amount(&self) -> Decimal {
        self.amount.or(self.total_amount).unwrap_or_default()
    }

    pub fn route(&self) -> String {
        format!(
            "{} -> {}",
            self.flight_details.from.as_deref().unwrap_or("N/A"),
            self.flight_details.to.as_deref().unwrap_or("N/A"),
        )
    }
}

/// Aggregate revenue report for one month.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueReport {
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub total_bookings: u32,
    #[serde(default)]
    pub total_passengers: u32,
    #[serde(default)]
    pub economy_class_bookings: u32,
    #[serde(default)]
    pub economy_class_revenue: Decimal,
    #[serde(default)]
    pub first_class_bookings: u32,
    #[serde(default)]
    pub first_class_revenue: Decimal,
    #[serde(default)]
    pub bookings: Vec<ReportBookingRow>,
}

impl MonthlyRevenueReport {
    /// Derived client-side; zero bookings means zero average.
    pub fn average_revenue_per_booking(&self) -> Decimal {
        if self.total_bookings == 0 {
            Decimal::ZERO
        } else {
            self.total_revenue / Decimal::from(self.total_bookings)
        }
    }
}
