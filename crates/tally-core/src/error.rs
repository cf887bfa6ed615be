//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Batch-level engine failures                    │
//! │  └── ValidationError  - Ingestion-boundary record failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → report endpoint → Frontend        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (staff id, field, record index)
//! 3. Errors are enum variants, never String
//! 4. Missing rate configuration is NOT an error - it falls back to the
//!    documented default rates. Only malformed input records reject a batch.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Batch-level engine errors.
///
/// The engine rejects a whole batch rather than silently dropping records:
/// a commission report computed from a partially-dropped batch would
/// understate payouts without anyone noticing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale record failed ingestion validation.
    ///
    /// ## When This Occurs
    /// - Blank staff id or customer name on a sale row
    /// - A sale row referencing a staff id absent from the roster
    ///
    /// The index points at the first offending record in the input slice so
    /// the caller can surface exactly which row needs fixing upstream.
    #[error("sale record {index} rejected: {source}")]
    RecordRejected {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// A staff roster record failed ingestion validation.
    #[error("staff record {index} rejected: {source}")]
    StaffRejected {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    ///
    /// Used for failures not tied to a single record, such as a malformed
    /// rate table in the supplied configuration.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Ingestion-boundary validation errors.
///
/// The upstream feeds are loosely typed; these errors enforce the required
/// fields before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A sale row references a staff member the roster does not know.
    #[error("sale references unknown staff id '{staff_id}'")]
    UnknownStaff { staff_id: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A rate table does not satisfy the band-shape invariant
    /// (contiguous from zero, no gaps, exactly one unbounded top band).
    #[error("rate table '{table}' is malformed: {reason}")]
    MalformedRateTable { table: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RecordRejected {
            index: 3,
            source: ValidationError::Required {
                field: "customer_name".to_string(),
            },
        };
        assert_eq!(err.to_string(), "sale record 3 rejected: customer_name is required");

        let err = ValidationError::UnknownStaff {
            staff_id: "S-042".to_string(),
        };
        assert_eq!(err.to_string(), "sale references unknown staff id 'S-042'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "exchange_rate".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_malformed_rate_table_message() {
        let err = ValidationError::MalformedRateTable {
            table: "tmt.se2".to_string(),
            reason: "missing unbounded top band".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rate table 'tmt.se2' is malformed: missing unbounded top band"
        );
    }
}
