//! UserStore tests against an in-memory SQLite database.

mod common;

use user_api::domain::{NewUser, UserChanges};
use user_api::errors::AppError;
use user_api::infra::{UserRepository, UserStore};

async fn store() -> UserStore {
    let db = common::setup_database().await;
    UserStore::new(db.get_connection())
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        firstname: Some("Ada".to_string()),
        lastname: Some("Lovelace".to_string()),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
    }
}

#[tokio::test]
async fn test_insert_assigns_id_and_active_flag() {
    let repo = store().await;

    let first = repo.insert(new_user("a@example.com")).await.unwrap();
    let second = repo.insert(new_user("b@example.com")).await.unwrap();

    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert!(first.is_active);
    assert_eq!(first.password, "$argon2id$stub");
}

#[tokio::test]
async fn test_insert_duplicate_email_is_unique_violation() {
    let repo = store().await;
    repo.insert(new_user("dup@example.com")).await.unwrap();

    let result = repo.insert(new_user("dup@example.com")).await;

    assert!(matches!(result, Err(AppError::UniqueViolation(_))));
    assert_eq!(repo.list(0, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_by_email_and_id() {
    let repo = store().await;
    let created = repo.insert(new_user("find@example.com")).await.unwrap();

    let by_email = repo.find_by_email("find@example.com").await.unwrap();
    assert_eq!(by_email, Some(created.clone()));
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created));

    assert!(repo.find_by_email("missing@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(9_999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_is_ordered_and_windowed() {
    let repo = store().await;
    for email in ["c@example.com", "a@example.com", "b@example.com"] {
        repo.insert(new_user(email)).await.unwrap();
    }

    let all = repo.list(0, 10).await.unwrap();
    let ids: Vec<i32> = all.iter().map(|u| u.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(all[0].email, "c@example.com");

    let window = repo.list(1, 1).await.unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].id, ids[1]);

    assert!(repo.list(10, 10).await.unwrap().is_empty());
    assert!(repo.list(u64::MAX, u64::MAX).await.unwrap().is_empty());
    assert!(repo.list(0, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_replaces_only_mutable_fields() {
    let repo = store().await;
    let created = repo.insert(new_user("old@example.com")).await.unwrap();

    let changes = UserChanges {
        firstname: Some("Grace".to_string()),
        lastname: None,
        email: "new@example.com".to_string(),
    };
    let updated = repo.update(created.id, changes).await.unwrap().unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.firstname.as_deref(), Some("Grace"));
    assert_eq!(updated.lastname, None);
    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.password, created.password);
    assert_eq!(updated.is_active, created.is_active);
    assert!(repo.find_by_email("old@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_missing_user_returns_none() {
    let repo = store().await;

    let changes = UserChanges {
        firstname: None,
        lastname: None,
        email: "ghost@example.com".to_string(),
    };
    assert!(repo.update(42, changes).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_to_taken_email_rolls_back() {
    let repo = store().await;
    repo.insert(new_user("taken@example.com")).await.unwrap();
    let other = repo.insert(new_user("other@example.com")).await.unwrap();

    let changes = UserChanges {
        firstname: Some("Changed".to_string()),
        lastname: None,
        email: "taken@example.com".to_string(),
    };
    let result = repo.update(other.id, changes).await;

    assert!(matches!(result, Err(AppError::UniqueViolation(_))));
    let unchanged = repo.find_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(unchanged, other);
}

#[tokio::test]
async fn test_delete_reports_whether_row_existed() {
    let repo = store().await;
    let created = repo.insert(new_user("gone@example.com")).await.unwrap();

    assert!(repo.delete_by_id(created.id).await.unwrap());
    assert!(!repo.delete_by_id(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let repo = store().await;
    let first = repo.insert(new_user("one@example.com")).await.unwrap();
    repo.delete_by_id(first.id).await.unwrap();

    let second = repo.insert(new_user("two@example.com")).await.unwrap();
    assert!(second.id > first.id);
}
