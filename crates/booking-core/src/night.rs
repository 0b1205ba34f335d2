use chrono::NaiveDate;
use serde::Serialize;

use crate::types::BookingError;

/// A half-open stay interval `[check_in, check_out)` over calendar dates.
///
/// The interval occupies the nights `check_in, check_in + 1, ...,
/// check_out - 1`; the check-out day itself is free. All arithmetic operates
/// on plain calendar dates, never on timestamps, so no time-of-day or zone
/// component can drift a date across a day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NightInterval {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl NightInterval {
    /// Builds an interval, rejecting `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, BookingError> {
        if check_out <= check_in {
            return Err(BookingError::InvalidRange);
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First occupied night.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Check-out date; never occupied.
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whether the given night falls inside the interval.
    pub fn occupies(&self, night: NaiveDate) -> bool {
        night >= self.check_in && night < self.check_out
    }

    /// Number of occupied nights.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Number of occupied nights after clipping to `[start, end)`.
    ///
    /// Returns zero when the interval lies entirely outside the clip range.
    pub fn clipped_nights(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let effective_start = self.check_in.max(start);
        let effective_end = self.check_out.min(end);

        (effective_end - effective_start).num_days().max(0)
    }

    /// Whether the two intervals share at least one night.
    pub fn overlaps(&self, other: &NightInterval) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Iterates the occupied nights in order.
    ///
    /// The iterator is restartable: cloning it replays from its current
    /// position, and calling this method again replays from the start.
    pub fn iter_nights(&self) -> Nights {
        Nights {
            next: self.check_in,
            end: self.check_out,
        }
    }
}

/// Iterator over the nights of a [`NightInterval`].
#[derive(Debug, Clone)]
pub struct Nights {
    next: NaiveDate,
    end: NaiveDate,
}

impl Iterator for Nights {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.next >= self.end {
            return None;
        }

        let night = self.next;
        self.next = night.succ_opt()?;
        Some(night)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_checkout_day_is_free() {
        let interval = NightInterval::new(date(2026, 3, 10), date(2026, 3, 13)).unwrap();

        assert!(interval.occupies(date(2026, 3, 10)));
        assert!(interval.occupies(date(2026, 3, 11)));
        assert!(interval.occupies(date(2026, 3, 12)));
        assert!(!interval.occupies(date(2026, 3, 13)));
        assert!(!interval.occupies(date(2026, 3, 9)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let same_day = NightInterval::new(date(2026, 3, 10), date(2026, 3, 10));
        assert!(matches!(same_day, Err(BookingError::InvalidRange)));

        let inverted = NightInterval::new(date(2026, 3, 13), date(2026, 3, 10));
        assert!(matches!(inverted, Err(BookingError::InvalidRange)));
    }

    #[test]
    fn test_night_count() {
        let interval = NightInterval::new(date(2026, 3, 10), date(2026, 3, 13)).unwrap();
        assert_eq!(interval.nights(), 3);

        let one_night = NightInterval::new(date(2026, 3, 10), date(2026, 3, 11)).unwrap();
        assert_eq!(one_night.nights(), 1);
    }

    #[test]
    fn test_clipped_nights() {
        let interval = NightInterval::new(date(2026, 3, 8), date(2026, 3, 14)).unwrap();

        // Fully inside the clip range
        assert_eq!(interval.clipped_nights(date(2026, 3, 1), date(2026, 3, 20)), 6);

        // Clipped on both sides
        assert_eq!(interval.clipped_nights(date(2026, 3, 10), date(2026, 3, 12)), 2);

        // Entirely outside
        assert_eq!(interval.clipped_nights(date(2026, 3, 20), date(2026, 3, 25)), 0);
        assert_eq!(interval.clipped_nights(date(2026, 3, 1), date(2026, 3, 5)), 0);
    }

    #[test]
    fn test_overlaps_excludes_checkout_day() {
        let first = NightInterval::new(date(2026, 3, 10), date(2026, 3, 13)).unwrap();

        // Back-to-back stays share no night
        let next = NightInterval::new(date(2026, 3, 13), date(2026, 3, 15)).unwrap();
        assert!(!first.overlaps(&next));
        assert!(!next.overlaps(&first));

        let overlapping = NightInterval::new(date(2026, 3, 12), date(2026, 3, 15)).unwrap();
        assert!(first.overlaps(&overlapping));
    }

    #[test]
    fn test_iter_nights_is_restartable() {
        let interval = NightInterval::new(date(2026, 3, 10), date(2026, 3, 13)).unwrap();

        let nights: Vec<NaiveDate> = interval.iter_nights().collect();
        assert_eq!(
            nights,
            vec![date(2026, 3, 10), date(2026, 3, 11), date(2026, 3, 12)]
        );

        // A second pass yields the same sequence
        let replay: Vec<NaiveDate> = interval.iter_nights().collect();
        assert_eq!(replay, nights);

        // Cloning mid-iteration replays from the clone point
        let mut iter = interval.iter_nights();
        iter.next();
        let rest: Vec<NaiveDate> = iter.clone().collect();
        assert_eq!(rest, vec![date(2026, 3, 11), date(2026, 3, 12)]);
    }

    #[test]
    fn test_iter_crosses_month_boundary() {
        let interval = NightInterval::new(date(2026, 2, 27), date(2026, 3, 2)).unwrap();
        let nights: Vec<NaiveDate> = interval.iter_nights().collect();
        assert_eq!(
            nights,
            vec![date(2026, 2, 27), date(2026, 2, 28), date(2026, 3, 1)]
        );
    }
}
