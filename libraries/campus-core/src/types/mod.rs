mod academic_year;
mod date_range;
mod fee;
mod money;
mod student;
mod transaction;
mod user;

pub use academic_year::{AcademicYear, CreateAcademicYear, YearId};
pub use date_range::DateRange;
pub use fee::{AssignAnnualFee, FeeSummary, FeeTotals, StudentAnnualFee};
pub use money::Money;
pub use student::{CreateStudent, Student, StudentDetails, StudentId, StudentStatus};
pub use transaction::{
    CreateTransaction, FeePayment, PaymentMethod, Transaction, TransactionId, TransactionRecord,
    TransactionType,
};
pub use user::{CreateUser, Role, User, UserId};
