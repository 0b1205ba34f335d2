use serde::{Deserialize, Serialize};

use crate::night::NightInterval;
use crate::types::BookingError;

/// A stay shorter than this many nights cannot use the full-event package.
///
/// Fixed business threshold; not derived from the event window.
pub const FULL_EVENT_MIN_NIGHTS: i64 = 5;

/// The two pricing models a shopper can choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Per-night rate times the number of nights
    Nightly,
    /// Flat package rate covering the whole stay
    FullEvent,
}

/// Rate card for one campsite.
///
/// Optional fields default to zero for surcharge purposes; a missing
/// full-event rate makes the package mode entirely unavailable for the site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RateCard {
    /// Price per night, covering one adult
    pub nightly_rate: f64,
    /// Flat package price for an eligible stay, covering one adult
    pub full_event_rate: Option<f64>,
    /// Per-night surcharge for each adult beyond the first
    pub extra_adult_nightly_rate: Option<f64>,
    /// One-off package surcharge for each adult beyond the first
    pub extra_adult_full_event_rate: Option<f64>,
}

/// Occupant counts for a stay. The base rate always covers exactly one
/// adult; children never incur a surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupants {
    adults: u32,
    children: u32,
}

impl Occupants {
    /// Builds the occupant counts, rejecting a zero-adult party.
    pub fn new(adults: u32, children: u32) -> Result<Self, BookingError> {
        if adults < 1 {
            return Err(BookingError::InvalidOccupancy);
        }

        Ok(Self { adults, children })
    }

    /// Number of adults in the party.
    pub fn adults(&self) -> u32 {
        self.adults
    }

    /// Number of children in the party.
    pub fn children(&self) -> u32 {
        self.children
    }

    /// Adults beyond the first, the ones that incur a surcharge.
    pub fn extra_adults(&self) -> u32 {
        self.adults.saturating_sub(1)
    }
}

/// The priced breakdown of a prospective stay.
///
/// Carries enough to reconstruct the receipt line, not just the total. The
/// mode is the effective one: a full-event request on an ineligible stay
/// comes back as nightly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StayQuote {
    /// The pricing mode actually applied
    pub mode: PricingMode,
    /// Number of nights charged
    pub nights: i64,
    /// Adults beyond the first
    pub extra_adults: u32,
    /// Base amount before surcharges
    pub base_amount: f64,
    /// Total extra-occupant surcharge
    pub extra_occupant_amount: f64,
    /// Amount to charge
    pub total: f64,
}

/// Whether the full-event package can be offered for a stay of `nights`.
///
/// Single source of truth for the package option's enabled state; the
/// presentation layer reflects this decision rather than re-deriving the
/// threshold, so previewed and charged prices cannot diverge.
pub fn full_event_eligible(rates: &RateCard, nights: i64) -> bool {
    rates.full_event_rate.is_some() && nights >= FULL_EVENT_MIN_NIGHTS
}

/// Prices a stay under the requested mode.
///
/// A full-event request on an ineligible site or window silently downgrades
/// to nightly; the shopper-facing UI disables the option rather than
/// surfacing an error, and client and server must agree on the downgrade.
/// Pure function of its inputs: identical inputs always produce an
/// identical quote.
pub fn price_stay(
    rates: &RateCard,
    window: &NightInterval,
    occupants: &Occupants,
    requested: PricingMode,
) -> Result<StayQuote, BookingError> {
    // Always charge at least one night
    let nights = window.nights().max(1);
    let extra_adults = occupants.extra_adults();

    let use_full_event = requested == PricingMode::FullEvent && full_event_eligible(rates, nights);

    let (mode, base_amount, extra_occupant_amount) = if use_full_event {
        let base = rates.full_event_rate.unwrap_or(0.0);
        let extra = f64::from(extra_adults) * rates.extra_adult_full_event_rate.unwrap_or(0.0);
        (PricingMode::FullEvent, base, extra)
    } else {
        let base = rates.nightly_rate * nights as f64;
        let extra = f64::from(extra_adults)
            * rates.extra_adult_nightly_rate.unwrap_or(0.0)
            * nights as f64;
        (PricingMode::Nightly, base, extra)
    };

    Ok(StayQuote {
        mode,
        nights,
        extra_adults,
        base_amount,
        extra_occupant_amount,
        total: base_amount + extra_occupant_amount,
    })
}
