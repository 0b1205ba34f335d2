use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::night::NightInterval;
use crate::pricing::{Occupants, PricingMode, StayQuote};
use crate::types::Campsite;

/// A priced stay held in the shopper's cart.
///
/// Built only after the site passed the availability filter and the stay was
/// priced; transient until order confirmation converts it into a persisted
/// reservation on the order service's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Unique identifier for the line item
    pub id: Uuid,
    /// The reserved site
    pub site_id: Uuid,
    /// Display label of the site, e.g. "A10"
    pub site_label: String,
    /// Check-in date for the stay
    pub check_in: NaiveDate,
    /// Check-out date for the stay
    pub check_out: NaiveDate,
    /// Number of adults
    pub adults: u32,
    /// Number of children
    pub children: u32,
    /// The pricing mode actually applied (post-downgrade)
    pub mode: PricingMode,
    /// Number of nights charged
    pub nights: i64,
    /// Base amount before surcharges
    pub base_amount: f64,
    /// Total extra-occupant surcharge
    pub extra_occupant_amount: f64,
    /// Amount to charge for this line item
    pub total: f64,
}

impl CartLineItem {
    /// Packages a priced stay on a site into a cart line item.
    pub fn build(
        site: &Campsite,
        window: &NightInterval,
        occupants: &Occupants,
        quote: &StayQuote,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_id: site.id,
            site_label: site.label.clone(),
            check_in: window.check_in(),
            check_out: window.check_out(),
            adults: occupants.adults(),
            children: occupants.children(),
            mode: quote.mode,
            nights: quote.nights,
            base_amount: quote.base_amount,
            extra_occupant_amount: quote.extra_occupant_amount,
            total: quote.total,
        }
    }
}

/// The fields forwarded verbatim to the external order-creation endpoint.
///
/// No re-validation happens at this hand-off; the order service owns the
/// write-time conflict check and creates the underlying reservation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// The reserved site
    pub site_id: Uuid,
    /// Check-in date for the stay
    pub check_in: NaiveDate,
    /// Check-out date for the stay
    pub check_out: NaiveDate,
    /// Number of adults
    pub adults: u32,
    /// Number of children
    pub children: u32,
    /// The pricing mode the total was computed under
    pub pricing_mode: PricingMode,
    /// The total the shopper was shown at cart time
    pub computed_total: f64,
}

impl From<&CartLineItem> for OrderPayload {
    fn from(item: &CartLineItem) -> Self {
        Self {
            site_id: item.site_id,
            check_in: item.check_in,
            check_out: item.check_out,
            adults: item.adults,
            children: item.children,
            pricing_mode: item.mode,
            computed_total: item.total,
        }
    }
}

/// Confirmation returned by the order service for one created order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Identifier of the created order
    pub order_id: String,
    /// Identifier of the reservation row the order service created
    pub reservation_id: Option<String>,
}

/// Custom error type for order-service hand-off failures
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The order service rejected the booking as a conflict (double-booking
    /// caught at write time)
    #[error("Booking conflict: {0}")]
    Conflict(String),

    /// Rate limited by the order service
    #[error("Rate limited by order service")]
    RateLimited,

    /// Authentication failed with the order service
    #[error("Authentication failed with order service")]
    AuthenticationFailed,

    /// The order service does not know the referenced site
    #[error("Order service could not find the campsite")]
    SiteNotFound,

    /// Any other order-service failure
    #[error("Order service error: {0}")]
    Api(String),

    /// Network error reaching the order service
    #[error("Network error: {0}")]
    Network(String),
}

/// Trait for the external order-creation collaborator.
#[async_trait::async_trait]
pub trait OrderGateway: Send + Sync {
    /// Creates an order for one cart line item.
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, OrderError>;
}
