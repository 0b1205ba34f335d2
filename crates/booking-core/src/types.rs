use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::cart::CartLineItem;
use crate::night::NightInterval;
use crate::pricing::{Occupants, PricingMode, RateCard};

/// An existing commitment of one campsite for a half-open night interval.
///
/// Reservations are created by the external order service; the engine only
/// reads them. Rows imported through the legacy path may carry a pending
/// claim, which is irrelevant to occupancy math.
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    /// Unique identifier for the reservation
    pub id: Uuid,
    /// The nights the reservation occupies, `[check_in, check_out)`
    pub interval: NightInterval,
    /// Whether this row came from the legacy import and is awaiting a claim
    pub pending_claim: bool,
}

/// A bookable physical site within a campground.
///
/// Read by the engine as an immutable-for-the-request snapshot; rate card and
/// coordinates are mutated only through admin endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Campsite {
    /// Unique identifier for the site
    pub id: Uuid,
    /// Display label, e.g. "A10"
    pub label: String,
    /// Whether the site has powered hookups
    pub powered: bool,
    /// Site length in meters, if recorded
    pub length_meters: Option<f64>,
    /// Site width in meters, if recorded
    pub width_meters: Option<f64>,
    /// Rate card for pricing this site
    pub rates: RateCard,
    /// Admin-settable flag; false pulls the site from sale
    pub available_for_sale: bool,
    /// Map x coordinate as a percentage, null until placed by an admin
    pub map_x: Option<f64>,
    /// Map y coordinate as a percentage, null until placed by an admin
    pub map_y: Option<f64>,
    /// Existing reservations for this site
    pub reservations: Vec<Reservation>,
}

/// A named collection of campsites sharing one map image.
#[derive(Debug, Clone, Serialize)]
pub struct Campground {
    /// Unique identifier for the campground
    pub id: Uuid,
    /// Display name of the campground
    pub name: String,
    /// The event this campground belongs to
    pub event_id: Uuid,
    /// URL of the campground map image, if one has been uploaded
    pub map_image_url: Option<String>,
}

/// The two date ranges an event exposes to the booking engine.
///
/// Site status is classified against the core window; the shopper's candidate
/// stay must fall within the (possibly wider) booking bounds, which allow
/// early arrival and late departure.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventWindows {
    /// The canonical event window used for Booked/Partial classification
    pub core: NightInterval,
    /// The widest stay window a shopper may request
    pub bounds: NightInterval,
}

impl EventWindows {
    /// Whether a requested stay lies within the booking bounds.
    pub fn permits(&self, stay: &NightInterval) -> bool {
        stay.check_in() >= self.bounds.check_in() && stay.check_out() <= self.bounds.check_out()
    }
}

/// Request structure for pricing a prospective stay on a site
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    /// Check-in date for the stay
    pub check_in: NaiveDate,
    /// Check-out date for the stay (this night is not occupied)
    pub check_out: NaiveDate,
    /// Number of adults; the base rate covers the first
    #[validate(range(min = 1, message = "At least one adult is required"))]
    pub adults: u32,
    /// Number of children; never surcharged
    #[serde(default)]
    pub children: u32,
    /// Requested pricing mode; may be downgraded to nightly if ineligible
    pub mode: PricingMode,
}

impl QuoteRequest {
    /// The requested stay window, rejecting inverted or empty ranges.
    pub fn window(&self) -> Result<NightInterval, BookingError> {
        NightInterval::new(self.check_in, self.check_out)
    }

    /// The occupant counts, rejecting a zero-adult party.
    pub fn occupants(&self) -> Result<Occupants, BookingError> {
        Occupants::new(self.adults, self.children)
    }
}

/// Request structure for adding a priced stay to the cart
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItemRequest {
    /// The site the shopper selected
    pub site_id: Uuid,
    /// Check-in date for the stay
    pub check_in: NaiveDate,
    /// Check-out date for the stay
    pub check_out: NaiveDate,
    /// Number of adults; the base rate covers the first
    #[validate(range(min = 1, message = "At least one adult is required"))]
    pub adults: u32,
    /// Number of children; never surcharged
    #[serde(default)]
    pub children: u32,
    /// Requested pricing mode; may be downgraded to nightly if ineligible
    pub mode: PricingMode,
}

impl AddCartItemRequest {
    /// The requested stay window, rejecting inverted or empty ranges.
    pub fn window(&self) -> Result<NightInterval, BookingError> {
        NightInterval::new(self.check_in, self.check_out)
    }

    /// The occupant counts, rejecting a zero-adult party.
    pub fn occupants(&self) -> Result<Occupants, BookingError> {
        Occupants::new(self.adults, self.children)
    }
}

/// Request structure for submitting cart line items to checkout
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// The cart line items to forward to the order service
    #[validate(length(min = 1, message = "Cart is empty"))]
    pub items: Vec<CartLineItem>,
}

/// Custom error type for booking operations
#[derive(thiserror::Error, Debug)]
pub enum BookingError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Check-out date is not after check-in date
    #[error("Invalid date range: check-out date must be after check-in date")]
    InvalidRange,

    /// Fewer than one adult in the party
    #[error("Invalid occupancy: at least one adult is required")]
    InvalidOccupancy,

    /// Campsite not found
    #[error("Campsite not found")]
    SiteNotFound,

    /// Campground not found
    #[error("Campground not found")]
    CampgroundNotFound,

    /// Site has an occupied night inside the requested window
    #[error("Campsite is not available for the requested dates")]
    SiteUnavailable,

    /// Order service failure surfaced at checkout
    #[error("Order service error: {0}")]
    OrderService(String),
}

impl actix_web::ResponseError for BookingError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            BookingError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            BookingError::InvalidRange => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_date_range",
                "message": "Check-out date must be after check-in date"
            })),
            BookingError::InvalidOccupancy => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "invalid_occupancy",
                "message": "At least one adult is required"
            })),
            BookingError::SiteNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "site_not_found",
                "message": "Campsite not found"
            })),
            BookingError::CampgroundNotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "campground_not_found",
                "message": "Campground not found"
            })),
            BookingError::SiteUnavailable => HttpResponse::Conflict().json(serde_json::json!({
                "error": "site_unavailable",
                "message": "Campsite is not available for the requested dates"
            })),
            BookingError::OrderService(msg) => HttpResponse::BadGateway().json(serde_json::json!({
                "error": "order_service_error",
                "message": format!("Order service error: {}", msg)
            })),
            BookingError::Database(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds_permit_early_arrival_but_not_beyond() {
        // Core event runs 3rd..8th; bookings open two days early
        let windows = EventWindows {
            core: NightInterval::new(date(2026, 3, 3), date(2026, 3, 8)).unwrap(),
            bounds: NightInterval::new(date(2026, 3, 1), date(2026, 3, 8)).unwrap(),
        };

        let early = NightInterval::new(date(2026, 3, 1), date(2026, 3, 5)).unwrap();
        assert!(windows.permits(&early));

        let too_early = NightInterval::new(date(2026, 2, 27), date(2026, 3, 5)).unwrap();
        assert!(!windows.permits(&too_early));

        let too_late = NightInterval::new(date(2026, 3, 5), date(2026, 3, 10)).unwrap();
        assert!(!windows.permits(&too_late));
    }
}
