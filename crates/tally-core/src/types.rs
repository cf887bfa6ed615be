//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │   StaffMember   │   │CommissionResult │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  staff_id       │   │  id             │   │  staff_id       │       │
//! │  │  customer_name  │   │  name           │   │  unique counts  │       │
//! │  │  amount_cents   │   │  position       │   │  resolved rates │       │
//! │  │  department     │   └─────────────────┘   │  commissions    │       │
//! │  │  flags          │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   RatePercent   │   │  ExchangeRate   │   │   Department    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  bps (u32)      │   │  Tmt            │       │
//! │  │  700 = 7%       │   │  47000 = ×4.7   │   │  Crt            │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! `SaleRecord` and `StaffMember` are immutable snapshots delivered by the
//! external feeds for a fixed report window. The engine never mutates or
//! persists them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Department
// =============================================================================

/// Sales department a record belongs to.
///
/// The two departments are paid on different commission models:
/// - TMT: a percentage of the total sale amount
/// - CRT: a fixed per-unique-customer ("per-head") amount in USD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    /// Commission is a percentage of summed sale amounts.
    Tmt,
    /// Commission is a per-head USD rate on unique customers.
    Crt,
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Department::Tmt => write!(f, "TMT"),
            Department::Crt => write!(f, "CRT"),
        }
    }
}

// =============================================================================
// Position
// =============================================================================

/// Staff position, as reported by the roster feed.
///
/// Position determines which rate table applies. The roster feed is loosely
/// typed, so an unrecognized value deserializes to [`Position::Unknown`]
/// and resolves to the default rates instead of failing the whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Position {
    #[serde(rename = "SE1")]
    Se1,
    #[serde(rename = "SE2")]
    Se2,
    #[serde(rename = "PE1")]
    Pe1,
    #[serde(rename = "PE2")]
    Pe2,
    Manager,
    /// Anything the roster feed sends that we do not recognize.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Se1 => write!(f, "SE1"),
            Position::Se2 => write!(f, "SE2"),
            Position::Pe1 => write!(f, "PE1"),
            Position::Pe2 => write!(f, "PE2"),
            Position::Manager => write!(f, "Manager"),
            Position::Unknown => write!(f, "Unknown"),
        }
    }
}

// =============================================================================
// Rate Percent
// =============================================================================

/// Commission percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7% (the lowest TMT commission tier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatePercent(u32);

impl RatePercent {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        RatePercent(bps)
    }

    /// Creates a rate from a whole-number percentage.
    ///
    /// The commission policy sheet is written in whole percents, so this is
    /// the constructor the reference tables use.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        RatePercent(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// USD to report-base-currency multiplier, in basis points.
///
/// 47_000 bps = ×4.7, the reference USD→MYR rate. The surrounding dashboard
/// resolves the live rate; the engine only needs the resolved scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExchangeRate(u32);

impl ExchangeRate {
    /// Reference USD→MYR rate (×4.7).
    pub const USD_TO_MYR: ExchangeRate = ExchangeRate(47_000);

    /// Identity rate (×1.0), for reports already denominated in USD.
    pub const IDENTITY: ExchangeRate = ExchangeRate(10_000);

    /// Creates an exchange rate from basis points (10_000 = ×1.0).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        ExchangeRate(bps)
    }

    /// Returns the multiplier in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the multiplier as a float (for display only).
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One sale transaction row, as delivered by the persisted sales store for
/// a report window.
///
/// Multiple rows may share the same `customer_name` within a department for
/// the same staff member; those collapse to one unique customer for tier
/// purposes, while every row's amount still counts toward the TMT sum.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    /// Staff member credited with the sale.
    pub staff_id: String,

    /// Customer name as entered upstream. Normalized (trimmed,
    /// case-insensitive) before deduplication.
    pub customer_name: String,

    /// Sale amount in cents (smallest currency unit).
    /// Zero and negative amounts are summed as-is; upstream data entry
    /// owns amount validation.
    pub amount_cents: i64,

    /// Department the sale belongs to.
    pub department: Department,

    /// Whether this row represents a completed deposit.
    pub is_depositor: bool,

    /// Whether this row is the customer's first qualifying deposit.
    pub is_fda: bool,
}

impl SaleRecord {
    /// Returns the sale amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Staff Member
// =============================================================================

/// A staff roster entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StaffMember {
    /// Opaque identifier from the roster feed.
    pub id: String,

    /// Display name shown on the report.
    pub name: String,

    /// Position, determines the applicable rate tables.
    pub position: Position,
}

// =============================================================================
// Report Window
// =============================================================================

/// Half-open date window `[start, end)` a report was computed for.
///
/// The sales store has already filtered the snapshot to this window; the
/// engine carries it through as report metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportWindow {
    /// First day of the window (inclusive).
    #[ts(as = "String")]
    pub start: NaiveDate,

    /// Day after the last day of the window (exclusive).
    #[ts(as = "String")]
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Creates a report window.
    #[inline]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        ReportWindow { start, end }
    }
}

// =============================================================================
// Commission Result
// =============================================================================

/// Per-staff commission breakdown for one report window.
///
/// Raw transaction counts (`tmt_transactions`, `crt_transactions`) are
/// audit fields for the report footer; the tier keys are the unique
/// depositor counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionResult {
    pub staff_id: String,
    pub staff_name: String,
    pub position: Position,

    /// Distinct normalized customers in TMT sales (the TMT tier key).
    pub tmt_unique_depositors: u32,
    /// Distinct normalized customers in CRT sales (the CRT tier key).
    pub crt_unique_depositors: u32,

    /// Raw TMT transaction count (audit only, never a tier key).
    pub tmt_transactions: u32,
    /// Raw CRT transaction count (audit only, never a tier key).
    pub crt_transactions: u32,

    /// Sum of TMT sale amounts in cents. Not deduplicated: every
    /// transaction's amount counts, even repeat customers.
    pub tmt_amount_cents: i64,

    /// Resolved TMT percentage in basis points.
    pub tmt_rate_bps: u32,
    /// Resolved CRT per-head rate in USD cents.
    pub crt_rate_per_head_cents: i64,

    /// TMT commission in base-currency cents.
    pub tmt_commission_cents: i64,
    /// CRT commission in USD cents, before conversion.
    pub crt_commission_usd_cents: i64,
    /// CRT commission converted to base-currency cents.
    pub crt_commission_cents: i64,
    /// TMT + CRT (base currency), the ranking key.
    pub total_commission_cents: i64,
}

impl CommissionResult {
    /// Returns the TMT commission as Money.
    #[inline]
    pub fn tmt_commission(&self) -> Money {
        Money::from_cents(self.tmt_commission_cents)
    }

    /// Returns the base-currency CRT commission as Money.
    #[inline]
    pub fn crt_commission(&self) -> Money {
        Money::from_cents(self.crt_commission_cents)
    }

    /// Returns the total commission as Money.
    #[inline]
    pub fn total_commission(&self) -> Money {
        Money::from_cents(self.total_commission_cents)
    }

    /// Returns the resolved TMT rate.
    #[inline]
    pub fn tmt_rate(&self) -> RatePercent {
        RatePercent::from_bps(self.tmt_rate_bps)
    }
}

// =============================================================================
// Commission Report
// =============================================================================

/// The full report the engine hands to the rendering layer.
///
/// `results` is sorted descending by total commission; ties keep the order
/// in which the staff member first appeared in the sale snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionReport {
    /// Window the snapshot was filtered to.
    pub window: ReportWindow,

    /// Exchange rate the CRT conversion used, in basis points.
    pub exchange_rate_bps: u32,

    /// One entry per staff member with at least one sale in the window.
    pub results: Vec<CommissionResult>,

    /// Number of staff members in `results`.
    pub staff_count: u32,

    /// Sum of `total_commission_cents` over `results`.
    pub total_commission_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_serde() {
        let json = serde_json::to_string(&Department::Tmt).unwrap();
        assert_eq!(json, "\"TMT\"");
        let dept: Department = serde_json::from_str("\"CRT\"").unwrap();
        assert_eq!(dept, Department::Crt);
    }

    #[test]
    fn test_position_serde_known_values() {
        let pos: Position = serde_json::from_str("\"SE1\"").unwrap();
        assert_eq!(pos, Position::Se1);
        let pos: Position = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(pos, Position::Manager);
        assert_eq!(serde_json::to_string(&Position::Pe2).unwrap(), "\"PE2\"");
    }

    #[test]
    fn test_position_unknown_value_falls_through() {
        // The roster feed occasionally sends positions we have no table for.
        let pos: Position = serde_json::from_str("\"Intern\"").unwrap();
        assert_eq!(pos, Position::Unknown);
    }

    #[test]
    fn test_rate_percent_conversions() {
        let rate = RatePercent::from_percent(7);
        assert_eq!(rate.bps(), 700);
        assert!((rate.percent() - 7.0).abs() < 0.001);

        let rate = RatePercent::from_bps(1250);
        assert!((rate.percent() - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_exchange_rate_reference_values() {
        assert_eq!(ExchangeRate::USD_TO_MYR.bps(), 47_000);
        assert!((ExchangeRate::USD_TO_MYR.multiplier() - 4.7).abs() < 0.0001);
        assert!((ExchangeRate::IDENTITY.multiplier() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_sale_record_amount_helper() {
        let sale = SaleRecord {
            staff_id: "S-1".to_string(),
            customer_name: "John Doe".to_string(),
            amount_cents: 125_000,
            department: Department::Tmt,
            is_depositor: true,
            is_fda: false,
        };
        assert_eq!(sale.amount().cents(), 125_000);
    }
}
