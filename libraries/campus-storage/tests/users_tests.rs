//! Integration tests for the users slice


use campus_core::types::{CreateUser, Role};
use campus_storage::StorageError;
use test_helpers::*;

fn signup(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "$2b$04$placeholder".to_string(),
        full_name: "Alice A".to_string(),
        role: Role::Admin,
    }
}

#[tokio::test]
async fn test_create_user_defaults() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = campus_storage::users::create(pool, signup("alice"))
        .await
        .unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.full_name, "Alice A");
    assert_eq!(user.role, Role::Admin);
    assert!(user.is_active, "New users should be active");
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    campus_storage::users::create(pool, signup("alice"))
        .await
        .unwrap();

    let result = campus_storage::users::create(pool, signup("alice")).await;
    assert!(
        matches!(result, Err(StorageError::Duplicate(_))),
        "Second signup with the same username should be a duplicate, got {:?}",
        result
    );

    let users = campus_storage::users::get_all(pool).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_get_with_password_hash() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    campus_storage::users::create(pool, signup("alice"))
        .await
        .unwrap();

    let (user, hash) = campus_storage::users::get_with_password_hash(pool, "alice")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(user.username, "alice");
    assert_eq!(hash, "$2b$04$placeholder");

    let missing = campus_storage::users::get_with_password_hash(pool, "bob")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_get_by_username_and_id_agree() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = create_test_user(pool, "bursar", "Bea Bursar").await;

    let by_name = campus_storage::users::get_by_username(pool, "bursar")
        .await
        .unwrap()
        .unwrap();
    let by_id = campus_storage::users::get_by_id(pool, created.user_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_name, by_id);
}
