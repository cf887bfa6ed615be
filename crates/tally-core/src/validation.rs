//! # Validation Module
//!
//! Ingestion-boundary validation for the external feeds.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Upstream data entry (dashboard forms)                        │
//! │  ├── Owns amount sanity, date ranges, duplicate detection              │
//! │  └── Out of scope here                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (required-field enforcement)                     │
//! │  ├── The feeds are loosely typed; blank ids or names would silently    │
//! │  │   merge or orphan commission rows                                   │
//! │  └── Any failure rejects the whole batch, never a silent default       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use tally_core::validation::validate_exchange_rate;
//! use tally_core::types::ExchangeRate;
//!
//! validate_exchange_rate(ExchangeRate::USD_TO_MYR).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{ExchangeRate, SaleRecord, StaffMember};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a sale record's required fields.
///
/// ## Rules
/// - `staff_id` must not be blank
/// - `customer_name` must not be blank after trimming (a blank name would
///   dedup every anonymous row into one "customer")
///
/// Amounts are intentionally NOT validated: zero and negative rows are
/// summed as-is, matching the upstream store.
pub fn validate_sale_record(sale: &SaleRecord) -> ValidationResult<()> {
    if sale.staff_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "staff_id".to_string(),
        });
    }

    if sale.customer_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    Ok(())
}

/// Validates a staff roster record's required fields.
pub fn validate_staff_member(staff: &StaffMember) -> ValidationResult<()> {
    if staff.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if staff.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Config Validators
// =============================================================================

/// Validates an exchange rate.
///
/// ## Rules
/// - Must be positive; a zero multiplier would silently erase all CRT
///   commission
pub fn validate_exchange_rate(rate: ExchangeRate) -> ValidationResult<()> {
    if rate.bps() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "exchange_rate".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Department, Position};

    fn sale(staff_id: &str, customer: &str) -> SaleRecord {
        SaleRecord {
            staff_id: staff_id.to_string(),
            customer_name: customer.to_string(),
            amount_cents: 10_000,
            department: Department::Tmt,
            is_depositor: true,
            is_fda: false,
        }
    }

    #[test]
    fn test_validate_sale_record() {
        assert!(validate_sale_record(&sale("S-1", "John Doe")).is_ok());

        assert!(validate_sale_record(&sale("", "John Doe")).is_err());
        assert!(validate_sale_record(&sale("   ", "John Doe")).is_err());
        assert!(validate_sale_record(&sale("S-1", "")).is_err());
        assert!(validate_sale_record(&sale("S-1", "   ")).is_err());
    }

    #[test]
    fn test_validate_sale_record_accepts_any_amount() {
        let mut zero = sale("S-1", "John Doe");
        zero.amount_cents = 0;
        assert!(validate_sale_record(&zero).is_ok());

        let mut negative = sale("S-1", "John Doe");
        negative.amount_cents = -5_000;
        assert!(validate_sale_record(&negative).is_ok());
    }

    #[test]
    fn test_validate_staff_member() {
        let staff = StaffMember {
            id: "S-1".to_string(),
            name: "Mike".to_string(),
            position: Position::Pe1,
        };
        assert!(validate_staff_member(&staff).is_ok());

        let blank_id = StaffMember {
            id: " ".to_string(),
            name: "Mike".to_string(),
            position: Position::Pe1,
        };
        assert!(validate_staff_member(&blank_id).is_err());

        let blank_name = StaffMember {
            id: "S-1".to_string(),
            name: "".to_string(),
            position: Position::Pe1,
        };
        assert!(validate_staff_member(&blank_name).is_err());
    }

    #[test]
    fn test_validate_exchange_rate() {
        assert!(validate_exchange_rate(ExchangeRate::USD_TO_MYR).is_ok());
        assert!(validate_exchange_rate(ExchangeRate::from_bps(0)).is_err());
    }
}
