//! Ledger transaction types

use super::{Money, StudentId, UserId, YearId};
use crate::error::CampusError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type TransactionId = i64;

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "Fee Payment")]
    FeePayment,
    #[serde(rename = "Expense")]
    Expense,
    #[serde(rename = "Income")]
    Income,
    /// Unpaid balance from an earlier year added to this year's due amount
    #[serde(rename = "Fee Carry Forward")]
    FeeCarryForward,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeePayment => "Fee Payment",
            Self::Expense => "Expense",
            Self::Income => "Income",
            Self::FeeCarryForward => "Fee Carry Forward",
        }
    }

    /// Entry kinds that only make sense against a student
    pub fn requires_student(&self) -> bool {
        matches!(self, Self::FeePayment | Self::FeeCarryForward)
    }

    /// Carry-forward amounts are signed: a negative balance is a credit
    /// from an earlier overpayment. Every other kind carries its direction
    /// in the type and must be positive.
    pub fn allows_negative(&self) -> bool {
        matches!(self, Self::FeeCarryForward)
    }
}

impl FromStr for TransactionType {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fee Payment" => Ok(Self::FeePayment),
            "Expense" => Ok(Self::Expense),
            "Income" => Ok(Self::Income),
            "Fee Carry Forward" => Ok(Self::FeeCarryForward),
            other => Err(CampusError::invalid_input(format!(
                "unknown transaction type: {}",
                other
            ))),
        }
    }
}

/// How money changed hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "Cheque")]
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::BankTransfer => "Bank Transfer",
            Self::Online => "Online",
            Self::Cheque => "Cheque",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(Self::Cash),
            "Bank Transfer" => Ok(Self::BankTransfer),
            "Online" => Ok(Self::Online),
            "Cheque" => Ok(Self::Cheque),
            other => Err(CampusError::invalid_input(format!(
                "unknown payment method: {}",
                other
            ))),
        }
    }
}

/// A stored ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
    pub student_id: Option<StudentId>,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub reference_details: Option<String>,
    pub recorded_by_user_id: UserId,
    pub year_id: YearId,
}

/// Data for appending a ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub reference_details: Option<String>,
    pub recorded_by_user_id: UserId,
    pub year_id: YearId,
}

impl CreateTransaction {
    /// Reject entries the ledger should never hold
    pub fn validate(&self) -> crate::Result<()> {
        if self.amount.is_zero() {
            return Err(CampusError::invalid_input("amount must not be zero"));
        }
        if !self.amount.is_positive() && !self.transaction_type.allows_negative() {
            return Err(CampusError::invalid_input(format!(
                "a {} amount must be greater than zero",
                self.transaction_type.as_str()
            )));
        }
        if self.transaction_type.requires_student() && self.student_id.is_none() {
            return Err(CampusError::invalid_input(format!(
                "a {} entry requires a student_id",
                self.transaction_type.as_str()
            )));
        }
        Ok(())
    }
}

/// A fee payment as submitted by staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeePayment {
    pub student_id: StudentId,
    pub amount: Money,
    pub transaction_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub reference_details: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// The academic year this payment is for
    pub year_id: YearId,
}

impl FeePayment {
    /// Ledger entry for this payment, attributed to `recorded_by`
    pub fn into_transaction(self, recorded_by: UserId) -> CreateTransaction {
        CreateTransaction {
            transaction_type: TransactionType::FeePayment,
            amount: self.amount,
            transaction_date: self.transaction_date,
            description: self.description,
            student_id: Some(self.student_id),
            category: None,
            payment_method: Some(self.payment_method),
            reference_details: self.reference_details,
            recorded_by_user_id: recorded_by,
            year_id: self.year_id,
        }
    }
}

/// A history row: the entry plus the full name of whoever recorded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: TransactionId,
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub transaction_date: NaiveDate,
    pub description: Option<String>,
    pub category: Option<String>,
    pub student_id: Option<StudentId>,
    pub recorded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(transaction_type: TransactionType, cents: i64, student: Option<i64>) -> CreateTransaction {
        CreateTransaction {
            transaction_type,
            amount: Money::from_cents(cents),
            transaction_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            description: None,
            student_id: student,
            category: None,
            payment_method: None,
            reference_details: None,
            recorded_by_user_id: 1,
            year_id: 1,
        }
    }

    #[test]
    fn test_type_parses_stored_labels() {
        assert_eq!(
            "Fee Carry Forward".parse::<TransactionType>().unwrap(),
            TransactionType::FeeCarryForward
        );
        assert!("Refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        for kind in [
            TransactionType::Expense,
            TransactionType::Income,
            TransactionType::FeePayment,
            TransactionType::FeeCarryForward,
        ] {
            assert!(entry(kind, 0, Some(7)).validate().is_err());
        }
    }

    #[test]
    fn test_validate_sign_per_kind() {
        assert!(entry(TransactionType::Expense, 100, None).validate().is_ok());
        assert!(entry(TransactionType::Expense, -100, None).validate().is_err());
        assert!(entry(TransactionType::FeePayment, -100, Some(7)).validate().is_err());
        assert!(entry(TransactionType::FeeCarryForward, -5_000, Some(7)).validate().is_ok());
        assert!(entry(TransactionType::FeeCarryForward, 5_000, Some(7)).validate().is_ok());
    }

    #[test]
    fn test_validate_requires_student_for_fee_entries() {
        assert!(entry(TransactionType::FeePayment, 100, None).validate().is_err());
        assert!(entry(TransactionType::FeeCarryForward, 100, None).validate().is_err());
        assert!(entry(TransactionType::FeePayment, 100, Some(7)).validate().is_ok());
    }

    #[test]
    fn test_fee_payment_payload() {
        let payment: FeePayment = serde_json::from_value(serde_json::json!({
            "student_id": 3,
            "amount": 400.0,
            "transaction_date": "2024-09-15",
            "payment_method": "Bank Transfer",
            "year_id": 2
        }))
        .unwrap();

        let tx = payment.into_transaction(9);
        assert_eq!(tx.transaction_type, TransactionType::FeePayment);
        assert_eq!(tx.amount, Money::from_cents(40_000));
        assert_eq!(tx.payment_method, Some(PaymentMethod::BankTransfer));
        assert_eq!(tx.student_id, Some(3));
        assert_eq!(tx.recorded_by_user_id, 9);
    }
}
