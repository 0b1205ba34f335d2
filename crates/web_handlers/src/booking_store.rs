use std::collections::HashMap;

use sqlx::{PgPool, Row};
use uuid::Uuid;

use booking_core::{
    BookingError, Campground, Campsite, EventWindows, NightInterval, RateCard, Reservation,
};

/// Everything the engine needs to evaluate one campground for one request.
#[derive(Debug, Clone)]
pub struct CampgroundSnapshot {
    /// The campground itself
    pub campground: Campground,
    /// The owning event's core window and booking bounds
    pub windows: EventWindows,
    /// All sites with their rate cards and reservations
    pub sites: Vec<Campsite>,
}

/// Service loading the per-request booking snapshot from storage.
///
/// The engine never writes; reservations are created by the external order
/// service, and rate cards are mutated only through admin endpoints.
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// Creates a new instance of `BookingStore` with the provided database connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads a campground, its event windows, and all sites with reservations.
    pub async fn get_campground_snapshot(
        &self,
        campground_id: &Uuid,
    ) -> Result<CampgroundSnapshot, BookingError> {
        let row = sqlx::query(
            r#"
            SELECT
                c.id, c.name, c.event_id, c.map_image_url,
                e.start_date, e.end_date, e.booking_open_date, e.booking_close_date
            FROM campgrounds c
            JOIN events e ON c.event_id = e.id
            WHERE c.id = $1
            "#,
        )
        .bind(campground_id)
        .fetch_optional(&self.pool)
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Err(BookingError::CampgroundNotFound),
        };

        let campground = Campground {
            id: row.get("id"),
            name: row.get("name"),
            event_id: row.get("event_id"),
            map_image_url: row.get("map_image_url"),
        };

        let windows = EventWindows {
            core: NightInterval::new(row.get("start_date"), row.get("end_date"))?,
            bounds: NightInterval::new(
                row.get("booking_open_date"),
                row.get("booking_close_date"),
            )?,
        };

        let sites = self.get_campground_sites(campground_id).await?;

        Ok(CampgroundSnapshot {
            campground,
            windows,
            sites,
        })
    }

    /// Loads one site with its reservations.
    pub async fn get_site(&self, site_id: &Uuid) -> Result<Campsite, BookingError> {
        let row = sqlx::query(
            r#"
            SELECT
                id, label, powered, length_meters, width_meters,
                nightly_rate, full_event_rate, extra_adult_nightly_rate,
                extra_adult_full_event_rate, available_for_sale, map_x, map_y
            FROM campsites
            WHERE id = $1
            "#,
        )
        .bind(site_id)
        .fetch_optional(&self.pool)
        .await?;

        let row = match row {
            Some(row) => row,
            None => return Err(BookingError::SiteNotFound),
        };

        let mut site = Self::site_from_row(&row);
        site.reservations = self
            .get_reservations(&[site.id])
            .await?
            .remove(&site.id)
            .unwrap_or_default();

        Ok(site)
    }

    /// Loads the event windows governing a site's campground.
    pub async fn get_event_windows_for_site(
        &self,
        site_id: &Uuid,
    ) -> Result<EventWindows, BookingError> {
        let row = sqlx::query(
            r#"
            SELECT e.start_date, e.end_date, e.booking_open_date, e.booking_close_date
            FROM campsites s
            JOIN campgrounds c ON s.campground_id = c.id
            JOIN events e ON c.event_id = e.id
            WHERE s.id = $1
            "#,
        )
        .bind(site_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(EventWindows {
                core: NightInterval::new(row.get("start_date"), row.get("end_date"))?,
                bounds: NightInterval::new(
                    row.get("booking_open_date"),
                    row.get("booking_close_date"),
                )?,
            }),
            None => Err(BookingError::SiteNotFound),
        }
    }

    /// Loads every site of a campground with reservations attached.
    async fn get_campground_sites(
        &self,
        campground_id: &Uuid,
    ) -> Result<Vec<Campsite>, BookingError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id, label, powered, length_meters, width_meters,
                nightly_rate, full_event_rate, extra_adult_nightly_rate,
                extra_adult_full_event_rate, available_for_sale, map_x, map_y
            FROM campsites
            WHERE campground_id = $1
            ORDER BY label
            "#,
        )
        .bind(campground_id)
        .fetch_all(&self.pool)
        .await?;

        let mut sites: Vec<Campsite> = rows.iter().map(Self::site_from_row).collect();

        let site_ids: Vec<Uuid> = sites.iter().map(|s| s.id).collect();
        let mut reservations = self.get_reservations(&site_ids).await?;

        for site in &mut sites {
            site.reservations = reservations.remove(&site.id).unwrap_or_default();
        }

        Ok(sites)
    }

    /// Loads reservations for a set of sites, grouped by site.
    async fn get_reservations(
        &self,
        site_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Reservation>>, BookingError> {
        let rows = sqlx::query(
            r#"
            SELECT id, campsite_id, check_in, check_out, pending_claim
            FROM reservations
            WHERE campsite_id = ANY($1)
            ORDER BY check_in
            "#,
        )
        .bind(site_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_site: HashMap<Uuid, Vec<Reservation>> = HashMap::new();

        for row in rows {
            let id: Uuid = row.get("id");

            // A reservation row with an inverted range cannot occupy any
            // night; skip it rather than failing the whole snapshot.
            let interval = match NightInterval::new(row.get("check_in"), row.get("check_out")) {
                Ok(interval) => interval,
                Err(_) => {
                    log::warn!("Skipping reservation {} with invalid date range", id);
                    continue;
                }
            };

            by_site
                .entry(row.get("campsite_id"))
                .or_default()
                .push(Reservation {
                    id,
                    interval,
                    pending_claim: row.get("pending_claim"),
                });
        }

        Ok(by_site)
    }

    fn site_from_row(row: &sqlx::postgres::PgRow) -> Campsite {
        Campsite {
            id: row.get("id"),
            label: row.get("label"),
            powered: row.get("powered"),
            length_meters: row.get("length_meters"),
            width_meters: row.get("width_meters"),
            rates: RateCard {
                nightly_rate: row.get("nightly_rate"),
                full_event_rate: row.get("full_event_rate"),
                extra_adult_nightly_rate: row.get("extra_adult_nightly_rate"),
                extra_adult_full_event_rate: row.get("extra_adult_full_event_rate"),
            },
            available_for_sale: row.get("available_for_sale"),
            map_x: row.get("map_x"),
            map_y: row.get("map_y"),
            reservations: Vec::new(),
        }
    }
}
