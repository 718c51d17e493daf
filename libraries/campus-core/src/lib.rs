//! Campus Core
//!
//! Platform-agnostic domain types and error handling for the school finance
//! services.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Student`, `AcademicYear`, `StudentAnnualFee`, `Transaction`
//! - **Value Types**: `Money` (integer cents), `DateRange` (validated inclusive range)
//! - **Fee arithmetic**: `FeeTotals` computes what a student still owes for a year
//! - **Error Handling**: Unified `CampusError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use campus_core::{FeeTotals, Money};
//!
//! let totals = FeeTotals {
//!     annual_fee: Money::from_cents(100_000),
//!     carried_forward: Money::from_cents(15_000),
//!     paid: Money::from_cents(60_000),
//! };
//!
//! assert_eq!(totals.pending().to_major(), 550.0);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CampusError, Result};

pub use types::{
    // Ledger primitives
    DateRange, FeeTotals, Money,
    // Users
    CreateUser, Role, User, UserId,
    // Students
    CreateStudent, Student, StudentDetails, StudentId, StudentStatus,
    // Academic years
    AcademicYear, CreateAcademicYear, YearId,
    // Fees
    AssignAnnualFee, FeeSummary, StudentAnnualFee,
    // Ledger
    CreateTransaction, FeePayment, PaymentMethod, Transaction, TransactionId,
    TransactionRecord, TransactionType,
};
