//! # Commission Engine
//!
//! Groups a sale snapshot by staff, deduplicates customers per department,
//! resolves tiered rates and produces the ranked commission report.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Commission Aggregation                             │
//! │                                                                         │
//! │  SaleRecord[] ──► validate batch ──► group by staff_id                  │
//! │                   (reject whole      (first-encounter order)            │
//! │                    batch on any                                         │
//! │                    bad record)            │                             │
//! │                                           ▼                             │
//! │  per staff ──► TMT: unique customers, txn count, amount sum             │
//! │            ──► CRT: unique customers, txn count                         │
//! │                                           │                             │
//! │                                           ▼                             │
//! │  rate tables ──► TMT% × amount sum                                      │
//! │              ──► CRT per-head × unique count ──► × exchange rate        │
//! │                                           │                             │
//! │                                           ▼                             │
//! │  CommissionResult[] sorted descending by total (stable ties)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! No I/O, no clock, no randomness. The same snapshot and configuration
//! always produce the same report, so concurrent report requests need no
//! coordination.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::rates::CommissionConfig;
use crate::types::{
    CommissionReport, CommissionResult, Department, ReportWindow, SaleRecord, StaffMember,
};
use crate::validation::{validate_sale_record, validate_staff_member};

// =============================================================================
// Customer Normalization
// =============================================================================

/// Normalizes a customer name for deduplication.
///
/// Trimmed and lowercased: `" John Doe "` and `"JOHN DOE"` are the same
/// unique customer. The raw name is never altered in the input snapshot.
///
/// ## Example
/// ```rust
/// use tally_core::engine::normalize_customer_name;
///
/// assert_eq!(normalize_customer_name(" John Doe "), "john doe");
/// assert_eq!(normalize_customer_name("JOHN DOE"), "john doe");
/// ```
pub fn normalize_customer_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Ingestion
// =============================================================================

/// Validates the snapshot and indexes the roster by staff id.
///
/// Shared by the commission and KPI entry points. Any malformed record
/// rejects the whole batch: a report computed from a partially-dropped
/// batch would silently understate payouts.
pub(crate) fn validated_roster_index<'a>(
    sales: &[SaleRecord],
    roster: &'a [StaffMember],
) -> CoreResult<HashMap<&'a str, &'a StaffMember>> {
    for (index, staff) in roster.iter().enumerate() {
        validate_staff_member(staff)
            .map_err(|source| CoreError::StaffRejected { index, source })?;
    }

    let by_id: HashMap<&str, &StaffMember> =
        roster.iter().map(|staff| (staff.id.as_str(), staff)).collect();

    for (index, sale) in sales.iter().enumerate() {
        validate_sale_record(sale).map_err(|source| CoreError::RecordRejected { index, source })?;

        if !by_id.contains_key(sale.staff_id.as_str()) {
            return Err(CoreError::RecordRejected {
                index,
                source: ValidationError::UnknownStaff {
                    staff_id: sale.staff_id.clone(),
                },
            });
        }
    }

    Ok(by_id)
}

// =============================================================================
// Per-Staff Accumulation
// =============================================================================

/// Running totals for one staff member in one department.
#[derive(Debug, Default)]
struct DepartmentTally {
    /// Normalized customer names seen so far. The set size is the tier key.
    unique_customers: HashSet<String>,
    /// Raw transaction count (audit field, never a tier key).
    transactions: u32,
    /// Amount sum. Deliberately NOT deduplicated: repeat customers count
    /// every transaction toward the TMT sum.
    amount: Money,
}

impl DepartmentTally {
    fn record(&mut self, sale: &SaleRecord) {
        self.unique_customers
            .insert(normalize_customer_name(&sale.customer_name));
        self.transactions += 1;
        self.amount += sale.amount();
    }

    fn unique_count(&self) -> u32 {
        self.unique_customers.len() as u32
    }
}

/// Running totals for one staff member across both departments.
struct StaffTally<'a> {
    staff: &'a StaffMember,
    tmt: DepartmentTally,
    crt: DepartmentTally,
}

impl StaffTally<'_> {
    /// Resolves rates and finalizes the commission breakdown.
    fn to_result(&self, config: &CommissionConfig) -> CommissionResult {
        let position = self.staff.position;
        let tmt_unique = self.tmt.unique_count();
        let crt_unique = self.crt.unique_count();

        let tmt_rate = config.tmt.rate_for(position, tmt_unique);
        let crt_rate_per_head = config.crt.rate_for(position, crt_unique);

        let tmt_commission = self.tmt.amount.apply_rate(tmt_rate);
        let crt_commission_usd = crt_rate_per_head * i64::from(crt_unique);
        let crt_commission = crt_commission_usd.convert(config.exchange_rate);
        let total_commission = tmt_commission + crt_commission;

        trace!(
            staff_id = %self.staff.id,
            tmt_unique,
            crt_unique,
            total = %total_commission,
            "staff aggregated"
        );

        CommissionResult {
            staff_id: self.staff.id.clone(),
            staff_name: self.staff.name.clone(),
            position,
            tmt_unique_depositors: tmt_unique,
            crt_unique_depositors: crt_unique,
            tmt_transactions: self.tmt.transactions,
            crt_transactions: self.crt.transactions,
            tmt_amount_cents: self.tmt.amount.cents(),
            tmt_rate_bps: tmt_rate.bps(),
            crt_rate_per_head_cents: crt_rate_per_head.cents(),
            tmt_commission_cents: tmt_commission.cents(),
            crt_commission_usd_cents: crt_commission_usd.cents(),
            crt_commission_cents: crt_commission.cents(),
            total_commission_cents: total_commission.cents(),
        }
    }
}

// =============================================================================
// Report Computation
// =============================================================================

/// Computes the commission report for a sale snapshot.
///
/// One result per staff member with at least one sale in the window; staff
/// with zero sales are omitted, not zero-filled. Results are sorted
/// descending by total commission; ties keep first-encounter order.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tally_core::engine::compute_commissions;
/// use tally_core::rates::CommissionConfig;
/// use tally_core::types::{Department, Position, ReportWindow, SaleRecord, StaffMember};
///
/// let roster = vec![StaffMember {
///     id: "S-1".to_string(),
///     name: "Mike".to_string(),
///     position: Position::Pe1,
/// }];
/// let sales = vec![SaleRecord {
///     staff_id: "S-1".to_string(),
///     customer_name: "John Doe".to_string(),
///     amount_cents: 50_000_000, // 500,000.00
///     department: Department::Tmt,
///     is_depositor: true,
///     is_fda: false,
/// }];
/// let window = ReportWindow::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
/// );
///
/// let report =
///     compute_commissions(&sales, &roster, &CommissionConfig::default(), window).unwrap();
///
/// // One unique customer lands in the 7% tier: 500,000.00 × 7% = 35,000.00
/// assert_eq!(report.results[0].tmt_commission_cents, 3_500_000);
/// ```
pub fn compute_commissions(
    sales: &[SaleRecord],
    roster: &[StaffMember],
    config: &CommissionConfig,
    window: ReportWindow,
) -> CoreResult<CommissionReport> {
    config.validate()?;
    let roster_by_id = validated_roster_index(sales, roster)?;

    debug!(
        sale_count = sales.len(),
        roster_count = roster.len(),
        exchange_rate_bps = config.exchange_rate.bps(),
        "computing commission report"
    );

    // Group by staff, preserving the order each staff member first appears
    // in the snapshot. That order is the tie-break for equal totals.
    let mut encounter_order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, StaffTally> = HashMap::new();

    for sale in sales {
        let tally = tallies.entry(sale.staff_id.as_str()).or_insert_with(|| {
            encounter_order.push(sale.staff_id.as_str());
            StaffTally {
                // Coverage was checked during ingestion.
                staff: roster_by_id[sale.staff_id.as_str()],
                tmt: DepartmentTally::default(),
                crt: DepartmentTally::default(),
            }
        });

        match sale.department {
            Department::Tmt => tally.tmt.record(sale),
            Department::Crt => tally.crt.record(sale),
        }
    }

    let mut results: Vec<CommissionResult> = encounter_order
        .iter()
        .map(|staff_id| tallies[staff_id].to_result(config))
        .collect();

    // Vec::sort_by is stable, so equal totals keep encounter order.
    results.sort_by(|a, b| b.total_commission_cents.cmp(&a.total_commission_cents));

    let total_commission_cents = results.iter().map(|r| r.total_commission_cents).sum();

    debug!(
        staff_count = results.len(),
        total_commission_cents, "commission report computed"
    );

    Ok(CommissionReport {
        window,
        exchange_rate_bps: config.exchange_rate.bps(),
        staff_count: results.len() as u32,
        total_commission_cents,
        results,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
