use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

use crate::utils::error::{AppError, AppResult};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PaymentMethod {
    #[serde(rename = "credit_card")]
    #[strum(serialize = "card", serialize = "credit_card", to_string = "Credit Card")]
    Card,
    #[serde(rename = "mobile_money")]
    #[strum(serialize = "momo", serialize = "mobile_money", to_string = "Mobile Money")]
    MobileMoney,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum MobileNetwork {
    #[strum(serialize = "mtn", to_string = "MTN Mobile Money")]
    Mtn,
    #[strum(serialize = "vodafone", to_string = "Vodafone Cash")]
    Vodafone,
    #[strum(serialize = "airteltigo", to_string = "AirtelTigo Money")]
    AirtelTigo,
}

#[derive(Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[validate(length(min = 1))]
    pub card_number: String,
    #[validate(length(min = 1))]
    pub expiry_date: String,
    #[validate(length(min = 1))]
    pub cvv: String,
}

// Card data must never reach logs, not even through a stray {:?}
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &"[redacted]")
            .field("expiry_date", &"[redacted]")
            .field("cvv", &"[redacted]")
            .finish()
    }
}

#[derive(Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MobileMoneyDetails {
    pub network: MobileNetwork,
    #[validate(length(min = 1))]
    pub phone_number: String,
}

impl fmt::Debug for MobileMoneyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MobileMoneyDetails")
            .field("network", &self.network)
            .field("phone_number", &"[redacted]")
            .finish()
    }
}

/// Method-specific payment input. Serialized as the bare detail object the
/// backend expects under `paymentDetails`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PaymentDetails {
    Card(CardDetails),
    MobileMoney(MobileMoneyDetails),
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Card(_) => PaymentMethod::Card,
            PaymentDetails::MobileMoney(_) => PaymentMethod::MobileMoney,
        }
    }

    /// Client-side completeness check; runs before anything is sent.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            PaymentDetails::Card(card) => card
                .validate()
                .map_err(|_| AppError::Validation("Please fill in all card details".into())),
            PaymentDetails::MobileMoney(momo) => momo.validate().map_err(|_| {
                AppError::Validation("Please fill in all mobile money details".into())
            }),
        }
    }
}

/// Body of `POST /api/bookings/confirm-payment`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub booking_id: String,
    pub payment_method: PaymentMethod,
    pub payment_details: PaymentDetails,
}
