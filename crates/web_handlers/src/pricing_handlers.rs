use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use booking_core::{BookingError, QuoteRequest, StayQuote, full_event_eligible, price_stay};

use crate::booking_store::BookingStore;

/// Response structure for a stay quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// The quoted site
    pub site_id: Uuid,
    /// Display label of the site
    pub site_label: String,
    /// Whether the full-event package may be offered for this stay
    pub full_event_available: bool,
    /// The priced breakdown
    pub quote: StayQuote,
}

/// Prices a prospective stay on a site.
///
/// The quote is a pure function of the site's rate card and the stay
/// parameters, so the same request always yields the same breakdown — the
/// cart total at checkout is reproducible from this endpoint's output. The
/// response carries the package eligibility verdict; the UI reflects it
/// rather than re-deriving the threshold.
pub async fn quote_stay(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<Uuid>,
    request: web::Json<QuoteRequest>,
) -> Result<HttpResponse, BookingError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| BookingError::Validation(format!("Validation error: {}", e)))?;

    let window = request.window()?;
    let occupants = request.occupants()?;

    let site_id = path.into_inner();
    let store = BookingStore::new(pool.get_ref().clone());
    let site = store.get_site(&site_id).await?;

    let quote = price_stay(&site.rates, &window, &occupants, request.mode)?;

    let response = QuoteResponse {
        site_id: site.id,
        site_label: site.label,
        full_event_available: full_event_eligible(&site.rates, window.nights()),
        quote,
    };

    Ok(HttpResponse::Ok().json(response))
}
