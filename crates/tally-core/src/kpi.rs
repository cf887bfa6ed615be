//! # KPI Scoring
//!
//! Secondary, independent score computed from the same sale snapshot:
//! `kpi_score = depositor_count × 10 + fda_count × 5`, both raw
//! transaction counts (no deduplication). Qualification compares the score
//! and the depositor count against per-position targets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::engine::validated_roster_index;
use crate::error::CoreResult;
use crate::types::{Position, SaleRecord, StaffMember};

// =============================================================================
// Score Weights
// =============================================================================

/// Points per sale record flagged as a completed deposit.
pub const DEPOSITOR_POINTS: u32 = 10;

/// Points per sale record flagged as a first deposit (FDA).
pub const FDA_POINTS: u32 = 5;

// =============================================================================
// Targets
// =============================================================================

/// Qualification thresholds for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KpiTarget {
    /// Minimum KPI score to qualify.
    pub kpi_score: u32,
    /// Minimum depositor count to qualify.
    pub depositors: u32,
}

/// Per-position qualification targets.
///
/// Pluggable configuration rather than a hardcoded table, so a deployment
/// can tune targets per position without touching the scoring logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KpiTargets {
    /// Targets for SE1.
    pub se1: KpiTarget,
    /// Targets for SE2.
    pub se2: KpiTarget,
    /// Targets for every other position.
    pub other: KpiTarget,
}

impl KpiTargets {
    /// Returns the targets applicable to a position.
    pub fn targets_for(&self, position: Position) -> KpiTarget {
        match position {
            Position::Se1 => self.se1,
            Position::Se2 => self.se2,
            _ => self.other,
        }
    }
}

impl Default for KpiTargets {
    fn default() -> Self {
        KpiTargets {
            se1: KpiTarget { kpi_score: 100, depositors: 10 },
            se2: KpiTarget { kpi_score: 150, depositors: 15 },
            other: KpiTarget { kpi_score: 200, depositors: 20 },
        }
    }
}

// =============================================================================
// KPI Result
// =============================================================================

/// Per-staff KPI score for one report window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KpiResult {
    pub staff_id: String,
    pub staff_name: String,
    pub position: Position,

    /// Sale records flagged as completed deposits (raw count).
    pub depositor_count: u32,
    /// Sale records flagged as first deposits (raw count).
    pub fda_count: u32,

    /// `depositor_count × 10 + fda_count × 5`.
    pub kpi_score: u32,

    /// Score target the staff member was measured against.
    pub kpi_target: u32,
    /// Depositor target the staff member was measured against.
    pub depositor_target: u32,

    /// `fda_count / depositor_count`, defined as 0.0 when there are no
    /// depositors.
    pub fda_rate: f64,

    /// Score AND depositor count both met their targets.
    pub is_qualified: bool,
}

// =============================================================================
// KPI Computation
// =============================================================================

/// Running counts for one staff member.
#[derive(Debug, Default)]
struct KpiTally {
    depositor_count: u32,
    fda_count: u32,
}

/// Computes KPI scores for a sale snapshot.
///
/// Same snapshot contract as the commission engine: one entry per staff
/// member with at least one sale, zero-sale staff omitted. Output keeps
/// first-encounter order; the report layer applies presentation sorting.
pub fn compute_kpi(
    sales: &[SaleRecord],
    roster: &[StaffMember],
    targets: &KpiTargets,
) -> CoreResult<Vec<KpiResult>> {
    let roster_by_id = validated_roster_index(sales, roster)?;

    debug!(sale_count = sales.len(), roster_count = roster.len(), "computing KPI scores");

    let mut encounter_order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, KpiTally> = HashMap::new();

    for sale in sales {
        let tally = tallies.entry(sale.staff_id.as_str()).or_insert_with(|| {
            encounter_order.push(sale.staff_id.as_str());
            KpiTally::default()
        });

        if sale.is_depositor {
            tally.depositor_count += 1;
        }
        if sale.is_fda {
            tally.fda_count += 1;
        }
    }

    let results = encounter_order
        .iter()
        .map(|staff_id| {
            let staff = roster_by_id[staff_id];
            let tally = &tallies[staff_id];
            let target = targets.targets_for(staff.position);

            let kpi_score =
                tally.depositor_count * DEPOSITOR_POINTS + tally.fda_count * FDA_POINTS;

            let fda_rate = if tally.depositor_count == 0 {
                0.0
            } else {
                tally.fda_count as f64 / tally.depositor_count as f64
            };

            KpiResult {
                staff_id: staff.id.clone(),
                staff_name: staff.name.clone(),
                position: staff.position,
                depositor_count: tally.depositor_count,
                fda_count: tally.fda_count,
                kpi_score,
                kpi_target: target.kpi_score,
                depositor_target: target.depositors,
                fda_rate,
                is_qualified: kpi_score >= target.kpi_score
                    && tally.depositor_count >= target.depositors,
            }
        })
        .collect();

    Ok(results)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::Department;

    fn staff(id: &str, position: Position) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            name: format!("Staff {id}"),
            position,
        }
    }

    fn sale(staff_id: &str, is_depositor: bool, is_fda: bool) -> SaleRecord {
        SaleRecord {
            staff_id: staff_id.to_string(),
            customer_name: "John Doe".to_string(),
            amount_cents: 10_000,
            department: Department::Tmt,
            is_depositor,
            is_fda,
        }
    }

    #[test]
    fn test_score_weights() {
        let roster = [staff("S-1", Position::Se1)];
        // 3 depositors, one of which is also an FDA: 3×10 + 1×5 = 35.
        let sales = [
            sale("S-1", true, false),
            sale("S-1", true, false),
            sale("S-1", true, true),
        ];

        let results = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap();

        assert_eq!(results[0].depositor_count, 3);
        assert_eq!(results[0].fda_count, 1);
        assert_eq!(results[0].kpi_score, 35);
    }

    #[test]
    fn test_counts_are_raw_not_deduplicated() {
        let roster = [staff("S-1", Position::Se1)];
        // Same customer on every row still counts every row.
        let sales = [sale("S-1", true, true), sale("S-1", true, true)];

        let results = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap();

        assert_eq!(results[0].depositor_count, 2);
        assert_eq!(results[0].fda_count, 2);
        assert_eq!(results[0].kpi_score, 30);
    }

    #[test]
    fn test_qualification_requires_both_targets() {
        let targets = KpiTargets::default();
        let roster = [staff("S-1", Position::Se1)];

        // SE1 targets: score ≥ 100 AND depositors ≥ 10.
        // 10 depositors, no FDA: score exactly 100 → qualified.
        let sales: Vec<SaleRecord> = (0..10).map(|_| sale("S-1", true, false)).collect();
        let results = compute_kpi(&sales, &roster, &targets).unwrap();
        assert_eq!(results[0].kpi_score, 100);
        assert!(results[0].is_qualified);

        // 9 depositors + FDAs push the score past 100, but the depositor
        // target is missed → not qualified.
        let mut sales: Vec<SaleRecord> = (0..9).map(|_| sale("S-1", true, true)).collect();
        sales.push(sale("S-1", false, true));
        let results = compute_kpi(&sales, &roster, &targets).unwrap();
        assert!(results[0].kpi_score >= 100);
        assert_eq!(results[0].depositor_count, 9);
        assert!(!results[0].is_qualified);
    }

    #[test]
    fn test_targets_follow_position() {
        let targets = KpiTargets::default();
        assert_eq!(targets.targets_for(Position::Se1).kpi_score, 100);
        assert_eq!(targets.targets_for(Position::Se2).kpi_score, 150);
        // Everything else gets the strictest targets.
        for position in [Position::Pe1, Position::Pe2, Position::Manager, Position::Unknown] {
            assert_eq!(targets.targets_for(position).kpi_score, 200);
            assert_eq!(targets.targets_for(position).depositors, 20);
        }
    }

    #[test]
    fn test_fda_rate_zero_when_no_depositors() {
        let roster = [staff("S-1", Position::Se1)];
        let sales = [sale("S-1", false, true)];

        let results = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap();

        assert_eq!(results[0].depositor_count, 0);
        assert_eq!(results[0].fda_count, 1);
        assert_eq!(results[0].fda_rate, 0.0);
    }

    #[test]
    fn test_fda_rate_ratio() {
        let roster = [staff("S-1", Position::Se1)];
        let sales = [
            sale("S-1", true, true),
            sale("S-1", true, false),
            sale("S-1", true, false),
            sale("S-1", true, false),
        ];

        let results = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap();
        assert!((results[0].fda_rate - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_sale_staff_omitted() {
        let roster = [staff("S-1", Position::Se1), staff("S-2", Position::Se2)];
        let sales = [sale("S-1", true, false)];

        let results = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].staff_id, "S-1");
    }

    #[test]
    fn test_encounter_order_preserved() {
        let roster = [staff("S-1", Position::Se1), staff("S-2", Position::Se2)];
        let sales = [
            sale("S-2", true, false),
            sale("S-1", true, false),
            sale("S-2", true, false),
        ];

        let results = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap();
        let order: Vec<&str> = results.iter().map(|r| r.staff_id.as_str()).collect();
        assert_eq!(order, ["S-2", "S-1"]);
    }

    #[test]
    fn test_unknown_staff_rejects_batch() {
        let roster = [staff("S-1", Position::Se1)];
        let sales = [sale("S-9", true, false)];

        let err = compute_kpi(&sales, &roster, &KpiTargets::default()).unwrap_err();
        assert!(matches!(err, CoreError::RecordRejected { index: 0, .. }));
    }

    #[test]
    fn test_targets_serde_round_trip() {
        let targets = KpiTargets::default();
        let json = serde_json::to_string(&targets).unwrap();
        let restored: KpiTargets = serde_json::from_str(&json).unwrap();
        assert_eq!(targets, restored);
    }
}
