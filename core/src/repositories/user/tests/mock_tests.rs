//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(uid: &str, pwd_update_time: i64) -> User {
    User {
        uid: uid.to_string(),
        password_hash: "salt:hash".to_string(),
        display_name: uid.to_uppercase(),
        phone: None,
        email: None,
        pwd_update_time,
        is_superuser: false,
    }
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    repo.create(user("alice", 10)).await.unwrap();

    let found = repo.find_by_uid("alice").await.unwrap().unwrap();
    assert_eq!(found.display_name, "ALICE");
    assert!(repo.find_by_uid("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_password_update_time_defaults_to_record() {
    let repo = MockUserRepository::new();
    repo.create(user("alice", 1_234)).await.unwrap();

    assert_eq!(repo.get_password_update_time("alice").await.unwrap(), Some(1_234));
    assert_eq!(repo.get_password_update_time("nobody").await.unwrap(), None);
    assert!(repo.user_exists("alice").await.unwrap());
    assert!(!repo.user_exists("nobody").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_uid_rejected() {
    let repo = MockUserRepository::new();
    repo.create(user("alice", 1)).await.unwrap();
    let result = repo.create(user("alice", 2)).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_update_unknown_user_fails() {
    let repo = MockUserRepository::new();
    let result = repo.update(user("ghost", 1)).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_is_ordered_by_uid() {
    let repo = MockUserRepository::new();
    repo.create(user("carol", 1)).await.unwrap();
    repo.create(user("alice", 1)).await.unwrap();
    repo.create(user("bob", 1)).await.unwrap();

    let uids: Vec<String> = repo.list().await.unwrap().into_iter().map(|u| u.uid).collect();
    assert_eq!(uids, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let repo = MockUserRepository::new();
    repo.create(user("alice", 1)).await.unwrap();
    repo.set_unavailable(true);

    let err = repo.get_password_update_time("alice").await.unwrap_err();
    assert!(err.is_store_unavailable());

    repo.set_unavailable(false);
    assert!(repo.user_exists("alice").await.unwrap());
}
