use crate::night::NightInterval;
use crate::types::Campsite;

/// Whether a site can be booked for the exact candidate window.
///
/// True iff the site is on sale and no existing reservation occupies any
/// night of the window. This is stricter than the display classification: a
/// site that reads partial on the map is still excluded here if even one of
/// its occupied nights falls inside the candidate window.
pub fn is_free_for(site: &Campsite, window: &NightInterval) -> bool {
    site.available_for_sale && !site.reservations.iter().any(|r| r.interval.overlaps(window))
}

/// Filters a campground's sites down to those bookable for the window.
///
/// The result reflects the reservation snapshot at read time only. Two
/// shoppers can both pass this filter for the same site; the external order
/// service rejects the losing booking at write time.
pub fn sites_available_for<'a>(sites: &'a [Campsite], window: &NightInterval) -> Vec<&'a Campsite> {
    sites
        .iter()
        .filter(|site| is_free_for(site, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::RateCard;
    use crate::types::Reservation;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn site(label: &str, available_for_sale: bool, stays: &[(NaiveDate, NaiveDate)]) -> Campsite {
        Campsite {
            id: Uuid::new_v4(),
            label: label.to_string(),
            powered: false,
            length_meters: None,
            width_meters: None,
            rates: RateCard::default(),
            available_for_sale,
            map_x: None,
            map_y: None,
            reservations: stays
                .iter()
                .map(|&(check_in, check_out)| Reservation {
                    id: Uuid::new_v4(),
                    interval: NightInterval::new(check_in, check_out).unwrap(),
                    pending_claim: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_partial_site_with_occupied_night_in_window_is_excluded() {
        // Site is only partially booked over the event, but one occupied
        // night falls inside the candidate window
        let sites = vec![site(
            "A1",
            true,
            &[(date(2026, 3, 2), date(2026, 3, 4))],
        )];
        let window = NightInterval::new(date(2026, 3, 3), date(2026, 3, 6)).unwrap();

        assert!(sites_available_for(&sites, &window).is_empty());
    }

    #[test]
    fn test_back_to_back_stay_is_bookable() {
        // Candidate check-in on the existing reservation's checkout day
        let sites = vec![site(
            "A1",
            true,
            &[(date(2026, 3, 1), date(2026, 3, 3))],
        )];
        let window = NightInterval::new(date(2026, 3, 3), date(2026, 3, 6)).unwrap();

        let free = sites_available_for(&sites, &window);
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].label, "A1");
    }

    #[test]
    fn test_off_sale_site_is_excluded_even_when_empty() {
        let sites = vec![site("A1", false, &[]), site("A2", true, &[])];
        let window = NightInterval::new(date(2026, 3, 3), date(2026, 3, 6)).unwrap();

        let free = sites_available_for(&sites, &window);
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].label, "A2");
    }

    #[test]
    fn test_reservation_elsewhere_in_event_does_not_block() {
        let sites = vec![site(
            "A1",
            true,
            &[(date(2026, 3, 10), date(2026, 3, 12))],
        )];
        let window = NightInterval::new(date(2026, 3, 3), date(2026, 3, 6)).unwrap();

        assert_eq!(sites_available_for(&sites, &window).len(), 1);
    }
}
