use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use booking_core::{
    BookingError, NightCount, NightInterval, NightOccupancy, RateCard, SiteStatus, classify,
    full_event_eligible, is_free_for, night_grid, per_night_counts,
};

use crate::booking_store::BookingStore;

/// Optional candidate stay window for the availability view.
///
/// When absent, the view is evaluated over the event's core window.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Candidate check-in date
    pub check_in: Option<NaiveDate>,
    /// Candidate check-out date
    pub check_out: Option<NaiveDate>,
}

/// One site as shown on the shopper-facing map and list views.
#[derive(Debug, Serialize)]
pub struct SiteAvailabilityView {
    /// Unique identifier for the site
    pub id: Uuid,
    /// Display label, e.g. "A10"
    pub label: String,
    /// Whether the site has powered hookups
    pub powered: bool,
    /// Map x coordinate as a percentage, if placed
    pub map_x: Option<f64>,
    /// Map y coordinate as a percentage, if placed
    pub map_y: Option<f64>,
    /// Display classification against the event's core window
    pub status: SiteStatus,
    /// Whether the site can be booked for the candidate window
    pub bookable: bool,
    /// Whether the full-event package may be offered for the candidate window
    pub full_event_available: bool,
    /// Rate card for price display
    pub rates: RateCard,
    /// Per-night occupancy over the candidate window, for calendar display
    pub nights: Vec<NightOccupancy>,
}

/// Response structure for the campground availability view
#[derive(Debug, Serialize)]
pub struct CampgroundAvailabilityResponse {
    /// Unique identifier for the campground
    pub campground_id: Uuid,
    /// Display name of the campground
    pub name: String,
    /// URL of the campground map image, if uploaded
    pub map_image_url: Option<String>,
    /// Evaluated check-in date
    pub check_in: NaiveDate,
    /// Evaluated check-out date
    pub check_out: NaiveDate,
    /// Every site of the campground
    pub sites: Vec<SiteAvailabilityView>,
}

/// Response structure for the per-night occupancy report
#[derive(Debug, Serialize)]
pub struct OccupancyReportResponse {
    /// Unique identifier for the campground
    pub campground_id: Uuid,
    /// Total number of sites in the campground
    pub total_sites: usize,
    /// Booked/available site counts for each night of the core window
    pub nights: Vec<NightCount>,
}

/// Shopper-facing availability view for one campground.
///
/// Every site appears, classified for the map (partial sites show even when
/// they cannot take the candidate window); the `bookable` flag carries the
/// strict filter verdict for the exact requested dates.
pub async fn get_campground_availability(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, BookingError> {
    let campground_id = path.into_inner();
    let store = BookingStore::new(pool.get_ref().clone());
    let snapshot = store.get_campground_snapshot(&campground_id).await?;

    let window = match (query.check_in, query.check_out) {
        (Some(check_in), Some(check_out)) => {
            let window = NightInterval::new(check_in, check_out)?;
            if !snapshot.windows.permits(&window) {
                return Err(BookingError::Validation(
                    "Requested dates fall outside the event's booking window".to_string(),
                ));
            }
            window
        }
        _ => snapshot.windows.core,
    };

    let sites: Vec<SiteAvailabilityView> = snapshot
        .sites
        .iter()
        .map(|site| SiteAvailabilityView {
            id: site.id,
            label: site.label.clone(),
            powered: site.powered,
            map_x: site.map_x,
            map_y: site.map_y,
            status: classify(&site.reservations, &snapshot.windows, site.available_for_sale),
            bookable: is_free_for(site, &window),
            full_event_available: full_event_eligible(&site.rates, window.nights()),
            rates: site.rates,
            nights: night_grid(&site.reservations, window).collect(),
        })
        .collect();

    let response = CampgroundAvailabilityResponse {
        campground_id: snapshot.campground.id,
        name: snapshot.campground.name,
        map_image_url: snapshot.campground.map_image_url,
        check_in: window.check_in(),
        check_out: window.check_out(),
        sites,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Per-night booked/available counts over the event's core window.
pub async fn get_occupancy_report(
    pool: web::Data<sqlx::PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    let campground_id = path.into_inner();
    let store = BookingStore::new(pool.get_ref().clone());
    let snapshot = store.get_campground_snapshot(&campground_id).await?;

    let response = OccupancyReportResponse {
        campground_id: snapshot.campground.id,
        total_sites: snapshot.sites.len(),
        nights: per_night_counts(&snapshot.sites, snapshot.windows.core),
    };

    Ok(HttpResponse::Ok().json(response))
}
