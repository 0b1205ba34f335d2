use chrono::NaiveDate;
use serde::Serialize;

use crate::night::NightInterval;
use crate::types::{Campsite, EventWindows, Reservation};

/// Display classification of a site against the event's core window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    /// No reservations touch the window and the site is on sale
    Available,
    /// Some reservations touch the window but not every core night is covered
    Partial,
    /// Every night of the core window is occupied by some reservation
    Booked,
    /// No reservations, but the site has been pulled from sale
    Unavailable,
}

/// One night of a site's occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NightOccupancy {
    /// The calendar night
    pub night: NaiveDate,
    /// Whether some reservation occupies this night
    pub booked: bool,
}

/// Per-night booked/available site counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NightCount {
    /// The calendar night
    pub night: NaiveDate,
    /// Number of sites with this night occupied
    pub booked: usize,
    /// Number of on-sale sites with this night free
    pub available: usize,
}

/// Lazily flags every night of `window` as booked or free for one site.
///
/// The sequence covers each night of the window exactly once, in order, and
/// is restartable: cloning replays it. A night is booked iff some
/// reservation's interval contains it, so overlapping reservations cannot
/// inflate the grid.
pub fn night_grid(
    reservations: &[Reservation],
    window: NightInterval,
) -> impl Iterator<Item = NightOccupancy> + Clone + '_ {
    window.iter_nights().map(move |night| NightOccupancy {
        night,
        booked: reservations.iter().any(|r| r.interval.occupies(night)),
    })
}

/// Sums each reservation's nights after clipping to the core window.
///
/// Inputs are expected to be non-overlapping (the persistence layer enforces
/// that at reservation creation); overlapping rows would be counted twice.
pub fn booked_nights_within(reservations: &[Reservation], core: NightInterval) -> i64 {
    reservations
        .iter()
        .map(|r| r.interval.clipped_nights(core.check_in(), core.check_out()))
        .sum()
}

/// Classifies one site for the shopper-facing map.
///
/// Reservations are checked against both the core window and the wider
/// booking bounds, so an early-arrival stay still marks the site partial.
/// The Booked/Partial split itself is decided against the core window only.
pub fn classify(
    reservations: &[Reservation],
    windows: &EventWindows,
    available_for_sale: bool,
) -> SiteStatus {
    let touches = reservations
        .iter()
        .any(|r| r.interval.overlaps(&windows.core) || r.interval.overlaps(&windows.bounds));

    if touches {
        if booked_nights_within(reservations, windows.core) >= windows.core.nights() {
            SiteStatus::Booked
        } else {
            SiteStatus::Partial
        }
    } else if available_for_sale {
        SiteStatus::Available
    } else {
        SiteStatus::Unavailable
    }
}

/// Per-night booked and available counts across all sites of a campground.
///
/// Sites pulled from sale are excluded from the available count but still
/// contribute their reservations to the booked count.
pub fn per_night_counts(sites: &[Campsite], window: NightInterval) -> Vec<NightCount> {
    window
        .iter_nights()
        .map(|night| {
            let booked = sites
                .iter()
                .filter(|site| site.reservations.iter().any(|r| r.interval.occupies(night)))
                .count();

            let available = sites
                .iter()
                .filter(|site| {
                    site.available_for_sale
                        && !site.reservations.iter().any(|r| r.interval.occupies(night))
                })
                .count();

            NightCount {
                night,
                booked,
                available,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::RateCard;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            interval: NightInterval::new(check_in, check_out).unwrap(),
            pending_claim: false,
        }
    }

    fn windows(core_in: NaiveDate, core_out: NaiveDate) -> EventWindows {
        EventWindows {
            core: NightInterval::new(core_in, core_out).unwrap(),
            bounds: NightInterval::new(core_in, core_out).unwrap(),
        }
    }

    fn site(available_for_sale: bool, reservations: Vec<Reservation>) -> Campsite {
        Campsite {
            id: Uuid::new_v4(),
            label: "A10".to_string(),
            powered: true,
            length_meters: Some(10.0),
            width_meters: Some(6.0),
            rates: RateCard::default(),
            available_for_sale,
            map_x: None,
            map_y: None,
            reservations,
        }
    }

    #[test]
    fn test_night_grid_flags_each_night() {
        let reservations = vec![reservation(date(2026, 3, 11), date(2026, 3, 13))];
        let window = NightInterval::new(date(2026, 3, 10), date(2026, 3, 14)).unwrap();

        let grid: Vec<NightOccupancy> = night_grid(&reservations, window).collect();
        assert_eq!(grid.len(), 4);
        assert!(!grid[0].booked); // 10th
        assert!(grid[1].booked); // 11th
        assert!(grid[2].booked); // 12th
        assert!(!grid[3].booked); // 13th, checkout day
    }

    #[test]
    fn test_four_of_five_core_nights_is_partial() {
        // Core window of 5 nights, reservation covers the first 4
        let ew = windows(date(2026, 3, 1), date(2026, 3, 6));
        let reservations = vec![reservation(date(2026, 3, 1), date(2026, 3, 5))];

        assert_eq!(classify(&reservations, &ew, true), SiteStatus::Partial);
    }

    #[test]
    fn test_joint_span_of_core_window_is_booked() {
        // Two non-contiguous reservations that jointly cover all 5 core nights
        let ew = windows(date(2026, 3, 1), date(2026, 3, 6));
        let reservations = vec![
            reservation(date(2026, 3, 1), date(2026, 3, 3)),
            reservation(date(2026, 3, 3), date(2026, 3, 6)),
        ];

        assert_eq!(classify(&reservations, &ew, true), SiteStatus::Booked);
    }

    #[test]
    fn test_reservation_spilling_past_core_is_clipped() {
        // Reservation runs past the core window on both sides; clipping keeps
        // the booked-night total at exactly the core length
        let ew = windows(date(2026, 3, 1), date(2026, 3, 6));
        let reservations = vec![reservation(date(2026, 2, 27), date(2026, 3, 9))];

        assert_eq!(booked_nights_within(&reservations, ew.core), 5);
        assert_eq!(classify(&reservations, &ew, true), SiteStatus::Booked);
    }

    #[test]
    fn test_no_reservations_follows_sale_flag() {
        let ew = windows(date(2026, 3, 1), date(2026, 3, 6));

        assert_eq!(classify(&[], &ew, true), SiteStatus::Available);
        assert_eq!(classify(&[], &ew, false), SiteStatus::Unavailable);
    }

    #[test]
    fn test_early_arrival_outside_core_is_partial() {
        // Core is 5 nights; bounds open 2 days earlier. A stay entirely in the
        // early-arrival band touches the bounds but covers zero core nights.
        let ew = EventWindows {
            core: NightInterval::new(date(2026, 3, 3), date(2026, 3, 8)).unwrap(),
            bounds: NightInterval::new(date(2026, 3, 1), date(2026, 3, 8)).unwrap(),
        };
        let reservations = vec![reservation(date(2026, 3, 1), date(2026, 3, 3))];

        assert_eq!(classify(&reservations, &ew, true), SiteStatus::Partial);
    }

    #[test]
    fn test_per_night_counts() {
        let window = NightInterval::new(date(2026, 3, 1), date(2026, 3, 4)).unwrap();
        let sites = vec![
            site(true, vec![reservation(date(2026, 3, 1), date(2026, 3, 3))]),
            site(true, vec![]),
            site(false, vec![]),
        ];

        let counts = per_night_counts(&sites, window);
        assert_eq!(counts.len(), 3);

        // Night of the 1st: first site booked, second free, third off sale
        assert_eq!(counts[0].booked, 1);
        assert_eq!(counts[0].available, 1);

        // Night of the 3rd: reservation checked out, both on-sale sites free
        assert_eq!(counts[2].booked, 0);
        assert_eq!(counts[2].available, 2);
    }
}
