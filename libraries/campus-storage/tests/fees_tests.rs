//! Integration tests for annual fees and the fee summary


use campus_core::types::*;
use campus_storage::StorageError;
use test_helpers::*;

async fn assign_fee(pool: &sqlx::SqlitePool, student_id: StudentId, year_id: YearId, cents: i64) {
    campus_storage::annual_fees::assign(
        pool,
        AssignAnnualFee {
            student_id,
            year_id,
            total_annual_fees: Money::from_cents(cents),
            notes: Some("standard tuition".to_string()),
        },
    )
    .await
    .expect("Failed to assign fee");
}

#[tokio::test]
async fn test_summary_with_carry_forward_and_payments() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "clerk", "Carl Clerk").await;
    let student = create_test_student(pool, "ADM-001").await;
    let year = create_test_year(pool, "2024-2025", true).await;
    let (sid, yid, uid) = (Some(student.student_id), year.year_id, user.user_id);

    assign_fee(pool, student.student_id, yid, 100_000).await;
    record_entry(pool, TransactionType::FeeCarryForward, 15_000, date(2024, 6, 1), sid, yid, uid).await;
    record_entry(pool, TransactionType::FeePayment, 40_000, date(2024, 7, 1), sid, yid, uid).await;
    record_entry(pool, TransactionType::FeePayment, 20_000, date(2024, 8, 1), sid, yid, uid).await;

    let summary = campus_storage::fees::summary(pool, student.student_id, yid)
        .await
        .unwrap();

    assert_eq!(summary.academic_year, "2024-2025");
    assert_eq!(summary.student_details.full_name, "Ada Lovelace");
    assert_eq!(summary.total_fees_due, Money::from_cents(115_000));
    assert_eq!(summary.total_amount_paid, Money::from_cents(60_000));
    assert_eq!(summary.pending_fees.to_major(), 550.0);
}

#[tokio::test]
async fn test_summary_with_carried_forward_credit() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "clerk", "Carl Clerk").await;
    let student = create_test_student(pool, "ADM-001").await;
    let year = create_test_year(pool, "2024-2025", true).await;
    let (sid, yid, uid) = (Some(student.student_id), year.year_id, user.user_id);

    // Overpaid last year by 50.00
    assign_fee(pool, student.student_id, yid, 100_000).await;
    record_entry(pool, TransactionType::FeeCarryForward, -5_000, date(2024, 6, 1), sid, yid, uid).await;
    record_entry(pool, TransactionType::FeePayment, 40_000, date(2024, 7, 1), sid, yid, uid).await;

    let summary = campus_storage::fees::summary(pool, student.student_id, yid)
        .await
        .unwrap();

    assert_eq!(summary.total_fees_due, Money::from_cents(95_000));
    assert_eq!(summary.total_amount_paid, Money::from_cents(40_000));
    assert_eq!(summary.pending_fees, Money::from_cents(55_000));
}

#[tokio::test]
async fn test_summary_ignores_other_students_and_years() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "clerk", "Carl Clerk").await;
    let student = create_test_student(pool, "ADM-001").await;
    let other = create_test_student(pool, "ADM-002").await;
    let year = create_test_year(pool, "2024-2025", true).await;
    let last_year = campus_storage::academic_years::create(
        pool,
        CreateAcademicYear {
            year_name: "2023-2024".to_string(),
            start_date: date(2023, 6, 1),
            end_date: date(2024, 3, 31),
            is_current: false,
        },
    )
    .await
    .unwrap();

    assign_fee(pool, student.student_id, year.year_id, 50_000).await;
    record_entry(pool, TransactionType::FeePayment, 10_000, date(2024, 7, 1), Some(other.student_id), year.year_id, user.user_id).await;
    record_entry(pool, TransactionType::FeePayment, 10_000, date(2023, 7, 1), Some(student.student_id), last_year.year_id, user.user_id).await;
    record_entry(pool, TransactionType::Income, 10_000, date(2024, 7, 1), Some(student.student_id), year.year_id, user.user_id).await;

    let summary = campus_storage::fees::summary(pool, student.student_id, year.year_id)
        .await
        .unwrap();

    assert_eq!(summary.total_amount_paid, Money::ZERO);
    assert_eq!(summary.pending_fees, Money::from_cents(50_000));
}

#[tokio::test]
async fn test_summary_without_fee_record() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let student = create_test_student(pool, "ADM-001").await;
    let year = create_test_year(pool, "2024-2025", true).await;

    let result = campus_storage::fees::summary(pool, student.student_id, year.year_id).await;
    match result {
        Err(StorageError::NotFound { entity, .. }) => assert_eq!(entity, "Fee record"),
        other => panic!("Expected missing fee record, got {:?}", other),
    }
}

#[tokio::test]
async fn test_summary_for_missing_student() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let result = campus_storage::fees::summary(pool, 1, 1).await;
    match result {
        Err(StorageError::NotFound { entity, .. }) => assert_eq!(entity, "Student"),
        other => panic!("Expected missing student, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_assignment_for_same_year_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let student = create_test_student(pool, "ADM-001").await;
    let year = create_test_year(pool, "2024-2025", true).await;

    assign_fee(pool, student.student_id, year.year_id, 100_000).await;

    let result = campus_storage::annual_fees::assign(
        pool,
        AssignAnnualFee {
            student_id: student.student_id,
            year_id: year.year_id,
            total_annual_fees: Money::from_cents(90_000),
            notes: None,
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::Duplicate(_))));
}
