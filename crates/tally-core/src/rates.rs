//! # Rate Configuration
//!
//! Banded commission rate tables and their resolution.
//!
//! ## Rate Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rate Resolution                                   │
//! │                                                                         │
//! │  (position, unique customer count)                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  PositionGroup ──► SE2        ──► scan SE2 band table                   │
//! │                ──► SE1 / PE1  ──► scan SE1/PE1 band table               │
//! │                ──► everything ──► flat per-position default             │
//! │                    else           (PE2, Manager, Unknown)               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  First band whose inclusive upper bound ≥ count wins                    │
//! │  (the top band is unbounded, so every count resolves)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Policy Data, Not Code
//! The tables are plain serde data so a deployment can override thresholds
//! from JSON config without touching the aggregation logic. `Default`
//! carries the reference policy.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ExchangeRate, Position, RatePercent};
use crate::validation::{validate_exchange_rate, ValidationResult};

// =============================================================================
// Position Group
// =============================================================================

/// Bucketing of positions for rate lookup.
///
/// The commission policy defines banded tables for two buckets only; every
/// other position is paid a flat per-position default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionGroup {
    /// SE2 has its own band thresholds.
    Se2,
    /// SE1 and PE1 share a band table.
    Se1Pe1,
    /// PE2, Manager and anything unrecognized: flat defaults.
    Other,
}

impl PositionGroup {
    /// Classifies a position into its rate bucket.
    pub fn of(position: Position) -> Self {
        match position {
            Position::Se2 => PositionGroup::Se2,
            Position::Se1 | Position::Pe1 => PositionGroup::Se1Pe1,
            Position::Pe2 | Position::Manager | Position::Unknown => PositionGroup::Other,
        }
    }
}

// =============================================================================
// Rate Bands
// =============================================================================

/// One band of a rate table: counts up to `max_count` (inclusive) earn
/// `rate`. `None` marks the unbounded top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateBand<R> {
    /// Inclusive upper bound on the unique customer count, or `None` for
    /// the top band.
    pub max_count: Option<u32>,
    /// Rate earned inside this band.
    pub rate: R,
}

/// An ordered list of contiguous bands starting at count 0.
///
/// Invariant (checked by [`RateTable::validate`]): finite bounds strictly
/// increase and exactly the last band is unbounded, so every non-negative
/// count resolves to exactly one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateTable<R> {
    pub bands: Vec<RateBand<R>>,
}

impl<R: Copy> RateTable<R> {
    /// Resolves the rate for a unique customer count.
    ///
    /// Linear scan in ascending band order; the first band whose upper
    /// bound covers the count wins. Returns `None` only on a malformed
    /// table (no unbounded top band) - validated tables always resolve.
    pub fn resolve(&self, count: u32) -> Option<R> {
        self.bands
            .iter()
            .find(|band| match band.max_count {
                Some(max) => count <= max,
                None => true,
            })
            .map(|band| band.rate)
    }

    /// Checks the band-shape invariant.
    ///
    /// `table` names the table in the error message (e.g. `"tmt.se2"`).
    pub fn validate(&self, table: &str) -> ValidationResult<()> {
        let malformed = |reason: &str| ValidationError::MalformedRateTable {
            table: table.to_string(),
            reason: reason.to_string(),
        };

        let Some((last, finite)) = self.bands.split_last() else {
            return Err(malformed("table has no bands"));
        };

        if last.max_count.is_some() {
            return Err(malformed("missing unbounded top band"));
        }

        let mut previous: Option<u32> = None;
        for band in finite {
            let Some(max) = band.max_count else {
                return Err(malformed("unbounded band before the top band"));
            };
            if let Some(prev) = previous {
                if max <= prev {
                    return Err(malformed("band bounds must strictly increase"));
                }
            }
            previous = Some(max);
        }

        Ok(())
    }
}

// =============================================================================
// TMT Rates (percentage of summed amounts)
// =============================================================================

/// TMT commission rate tables.
///
/// TMT commission = staff's summed TMT sale amounts × resolved percentage.
/// The tier key is the staff's unique TMT customer count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TmtRates {
    /// Band table for SE2.
    pub se2: RateTable<RatePercent>,
    /// Band table shared by SE1 and PE1.
    pub se1_pe1: RateTable<RatePercent>,
    /// Flat rate for PE2.
    pub pe2_rate: RatePercent,
    /// Flat rate for Manager.
    pub manager_rate: RatePercent,
    /// Flat rate for anything else, and the fallback for a malformed
    /// band table.
    pub default_rate: RatePercent,
}

impl TmtRates {
    /// Resolves the TMT percentage for a position and unique customer count.
    ///
    /// Never fails: positions without a band table get their flat default.
    pub fn rate_for(&self, position: Position, unique_count: u32) -> RatePercent {
        match PositionGroup::of(position) {
            PositionGroup::Se2 => self.se2.resolve(unique_count).unwrap_or(self.default_rate),
            PositionGroup::Se1Pe1 => self
                .se1_pe1
                .resolve(unique_count)
                .unwrap_or(self.default_rate),
            PositionGroup::Other => match position {
                Position::Pe2 => self.pe2_rate,
                Position::Manager => self.manager_rate,
                _ => self.default_rate,
            },
        }
    }

    /// Checks both band tables.
    pub fn validate(&self) -> ValidationResult<()> {
        self.se2.validate("tmt.se2")?;
        self.se1_pe1.validate("tmt.se1_pe1")?;
        Ok(())
    }
}

impl Default for TmtRates {
    fn default() -> Self {
        let pct = RatePercent::from_percent;
        TmtRates {
            se2: RateTable {
                bands: vec![
                    RateBand { max_count: Some(150), rate: pct(7) },
                    RateBand { max_count: Some(200), rate: pct(8) },
                    RateBand { max_count: Some(235), rate: pct(9) },
                    RateBand { max_count: None, rate: pct(10) },
                ],
            },
            se1_pe1: RateTable {
                bands: vec![
                    RateBand { max_count: Some(140), rate: pct(7) },
                    RateBand { max_count: Some(190), rate: pct(8) },
                    RateBand { max_count: Some(225), rate: pct(9) },
                    RateBand { max_count: None, rate: pct(10) },
                ],
            },
            pe2_rate: pct(10),
            manager_rate: pct(12),
            default_rate: pct(7),
        }
    }
}

// =============================================================================
// CRT Rates (USD per unique customer)
// =============================================================================

/// CRT commission rate tables.
///
/// CRT commission = unique CRT customer count × resolved per-head USD rate,
/// converted to the report base currency afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrtRates {
    /// Band table for SE2.
    pub se2: RateTable<Money>,
    /// Band table shared by SE1 and PE1.
    pub se1_pe1: RateTable<Money>,
    /// Flat per-head rate for every other position, and the fallback for
    /// a malformed band table.
    pub default_per_head: Money,
}

impl CrtRates {
    /// Resolves the per-head USD rate for a position and unique customer
    /// count.
    pub fn rate_for(&self, position: Position, unique_count: u32) -> Money {
        match PositionGroup::of(position) {
            PositionGroup::Se2 => self
                .se2
                .resolve(unique_count)
                .unwrap_or(self.default_per_head),
            PositionGroup::Se1Pe1 => self
                .se1_pe1
                .resolve(unique_count)
                .unwrap_or(self.default_per_head),
            PositionGroup::Other => self.default_per_head,
        }
    }

    /// Checks both band tables.
    pub fn validate(&self) -> ValidationResult<()> {
        self.se2.validate("crt.se2")?;
        self.se1_pe1.validate("crt.se1_pe1")?;
        Ok(())
    }
}

impl Default for CrtRates {
    fn default() -> Self {
        // The policy sheet writes the lowest CRT band as a strict
        // less-than (`< 130` for SE2, `< 110` for SE1/PE1), unlike the
        // inclusive TMT bounds. Encoded here as inclusive 129 / 109;
        // pending product-owner confirmation, kept verbatim.
        CrtRates {
            se2: RateTable {
                bands: vec![
                    RateBand { max_count: Some(129), rate: Money::from_cents(50) },
                    RateBand { max_count: Some(160), rate: Money::from_cents(80) },
                    RateBand { max_count: Some(200), rate: Money::from_cents(90) },
                    RateBand { max_count: None, rate: Money::from_cents(100) },
                ],
            },
            se1_pe1: RateTable {
                bands: vec![
                    RateBand { max_count: Some(109), rate: Money::from_cents(50) },
                    RateBand { max_count: Some(140), rate: Money::from_cents(80) },
                    RateBand { max_count: Some(170), rate: Money::from_cents(90) },
                    RateBand { max_count: None, rate: Money::from_cents(100) },
                ],
            },
            default_per_head: Money::from_cents(50),
        }
    }
}

// =============================================================================
// Commission Config
// =============================================================================

/// The full injectable configuration for a commission report.
///
/// ## Example
/// ```rust
/// use tally_core::rates::CommissionConfig;
/// use tally_core::types::Position;
///
/// let config = CommissionConfig::default();
///
/// // SE2 boundary: 150 unique customers is still the 7% tier
/// assert_eq!(config.tmt.rate_for(Position::Se2, 150).bps(), 700);
/// assert_eq!(config.tmt.rate_for(Position::Se2, 151).bps(), 800);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionConfig {
    /// TMT percentage tables.
    pub tmt: TmtRates,
    /// CRT per-head tables.
    pub crt: CrtRates,
    /// USD → base currency multiplier applied to CRT commission.
    pub exchange_rate: ExchangeRate,
}

impl CommissionConfig {
    /// Checks every band table and the exchange rate.
    ///
    /// The engine runs this once per report before aggregating.
    pub fn validate(&self) -> ValidationResult<()> {
        self.tmt.validate()?;
        self.crt.validate()?;
        validate_exchange_rate(self.exchange_rate)?;
        Ok(())
    }
}

impl Default for CommissionConfig {
    fn default() -> Self {
        CommissionConfig {
            tmt: TmtRates::default(),
            crt: CrtRates::default(),
            exchange_rate: ExchangeRate::USD_TO_MYR,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
