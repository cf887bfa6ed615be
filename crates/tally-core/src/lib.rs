//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally's commission reporting. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard (TypeScript)                          │   │
//! │  │    Commission report ──► KPI report ──► Overall report         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Report Endpoints (external)                     │   │
//! │  │    Fetch sale rows + staff roster for a window, resolve the     │   │
//! │  │    exchange rate, render whatever the engine returns            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   rates   │  │  engine   │  │    kpi    │  │   │
//! │  │   │SaleRecord │  │ RateTable │  │  dedup    │  │  scoring  │  │   │
//! │  │   │  Money    │  │  bands    │  │ aggregate │  │ qualify   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SaleRecord, StaffMember, results, …)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rates`] - Banded rate tables as injectable configuration
//! - [`engine`] - Customer dedup, aggregation, ranking
//! - [`kpi`] - KPI scoring and qualification
//! - [`error`] - Domain error types
//! - [`validation`] - Ingestion-boundary validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same snapshot + config = same report, always
//! 2. **No I/O**: Database, network, clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Policy as Data**: Rate thresholds and KPI targets are injectable
//!    configuration, not hardcoded branching
//! 5. **Explicit Errors**: Malformed input rejects the batch loudly; missing
//!    rate configuration falls back to documented defaults, never throws
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally_core::engine::compute_commissions;
//! use tally_core::rates::CommissionConfig;
//! use tally_core::types::{Department, Position, ReportWindow, SaleRecord, StaffMember};
//!
//! let roster = vec![StaffMember {
//!     id: "S-7".to_string(),
//!     name: "Mike".to_string(),
//!     position: Position::Se2,
//! }];
//!
//! // Two rows, one customer after normalization.
//! let sales = vec![
//!     SaleRecord {
//!         staff_id: "S-7".to_string(),
//!         customer_name: " John Doe ".to_string(),
//!         amount_cents: 100_000,
//!         department: Department::Tmt,
//!         is_depositor: true,
//!         is_fda: true,
//!     },
//!     SaleRecord {
//!         staff_id: "S-7".to_string(),
//!         customer_name: "JOHN DOE".to_string(),
//!         amount_cents: 50_000,
//!         department: Department::Tmt,
//!         is_depositor: true,
//!         is_fda: false,
//!     },
//! ];
//!
//! let window = ReportWindow::new(
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
//! );
//!
//! let report =
//!     compute_commissions(&sales, &roster, &CommissionConfig::default(), window).unwrap();
//!
//! let result = &report.results[0];
//! assert_eq!(result.tmt_unique_depositors, 1); // deduplicated tier key
//! assert_eq!(result.tmt_amount_cents, 150_000); // amount sum never dedups
//! assert_eq!(result.tmt_rate_bps, 700); // 1 unique customer → 7% tier
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod kpi;
pub mod money;
pub mod rates;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Money` instead of
// `use tally_core::money::Money`

pub use engine::{compute_commissions, normalize_customer_name};
pub use error::{CoreError, CoreResult, ValidationError};
pub use kpi::{compute_kpi, KpiResult, KpiTarget, KpiTargets};
pub use money::Money;
pub use rates::{CommissionConfig, CrtRates, PositionGroup, RateBand, RateTable, TmtRates};
pub use types::*;
