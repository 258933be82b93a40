mod common;

use std::collections::HashSet;
use std::sync::Arc;

use account_service::domain::account::models::AccountId;
use account_service::domain::errors::AuthError;
use account_service::domain::token::models::RefreshTokenId;
use account_service::domain::token::models::REFRESH_TOKENS_PER_ACCOUNT_LIMIT;
use account_service::domain::token::ports::RefreshTokenRepository;
use chrono::Duration;
use chrono::Utc;

use crate::common::account_codec;
use crate::common::token_codec;
use crate::common::InMemoryRefreshTokenRepository;

fn account(id: i64) -> AccountId {
    AccountId(account_codec().encode(id))
}

#[tokio::test]
async fn test_cap_retains_newest_tokens() {
    let repository = InMemoryRefreshTokenRepository::new(token_codec());
    let account = account(1);

    let mut issued = Vec::new();
    let base = Utc::now();
    for i in 0..25 {
        let created_at = base + Duration::seconds(i);
        let token = repository
            .add(&account, created_at, created_at + Duration::days(30))
            .await
            .unwrap();
        issued.push(token);
    }

    let live = repository.list(&account).await.unwrap();
    assert_eq!(live.len(), REFRESH_TOKENS_PER_ACCOUNT_LIMIT);

    // Exactly the ten most recently issued tokens survive, newest first.
    let expected: Vec<RefreshTokenId> =
        issued.iter().rev().take(10).map(|t| t.id.clone()).collect();
    let actual: Vec<RefreshTokenId> = live.iter().map(|t| t.id.clone()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_cap_below_limit_keeps_everything() {
    let repository = InMemoryRefreshTokenRepository::new(token_codec());
    let account = account(1);

    let base = Utc::now();
    for i in 0..4 {
        let created_at = base + Duration::seconds(i);
        repository
            .add(&account, created_at, created_at + Duration::days(30))
            .await
            .unwrap();
    }

    assert_eq!(repository.list(&account).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_cap_holds_under_concurrent_adds() {
    let repository = Arc::new(InMemoryRefreshTokenRepository::new(token_codec()));
    let account = account(1);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repository = repository.clone();
        let account = account.clone();
        handles.push(tokio::spawn(async move {
            let now = Utc::now();
            repository.add(&account, now, now + Duration::days(30)).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let live = repository.list(&account).await.unwrap();
    assert!(!live.is_empty());
    assert!(live.len() <= REFRESH_TOKENS_PER_ACCOUNT_LIMIT);

    let distinct: HashSet<RefreshTokenId> = live.iter().map(|t| t.id.clone()).collect();
    assert_eq!(distinct.len(), live.len());
}

#[tokio::test]
async fn test_accounts_do_not_share_the_cap() {
    let repository = InMemoryRefreshTokenRepository::new(token_codec());
    let first = account(1);
    let second = account(2);

    let base = Utc::now();
    for i in 0..12 {
        let created_at = base + Duration::seconds(i);
        repository
            .add(&first, created_at, created_at + Duration::days(30))
            .await
            .unwrap();
        repository
            .add(&second, created_at, created_at + Duration::days(30))
            .await
            .unwrap();
    }

    assert_eq!(
        repository.list(&first).await.unwrap().len(),
        REFRESH_TOKENS_PER_ACCOUNT_LIMIT
    );
    assert_eq!(
        repository.list(&second).await.unwrap().len(),
        REFRESH_TOKENS_PER_ACCOUNT_LIMIT
    );
}

#[tokio::test]
async fn test_replace_rotates_in_place() {
    let repository = InMemoryRefreshTokenRepository::new(token_codec());
    let account = account(1);

    let now = Utc::now();
    let original = repository
        .add(&account, now, now + Duration::days(30))
        .await
        .unwrap();

    let later = now + Duration::hours(1);
    let replacement = repository
        .replace(&original.id, later, later + Duration::days(30))
        .await
        .unwrap();
    assert_ne!(replacement.id, original.id);

    // The live set still has one token and it is the replacement.
    let live = repository.list(&account).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, replacement.id);

    // The consumed token cannot be rotated again.
    let result = repository
        .replace(&original.id, later, later + Duration::days(30))
        .await;
    assert!(matches!(result, Err(AuthError::NotFound(_))));
}

#[tokio::test]
async fn test_replace_unknown_token_mutates_nothing() {
    let repository = InMemoryRefreshTokenRepository::new(token_codec());
    let account = account(1);

    let now = Utc::now();
    repository
        .add(&account, now, now + Duration::days(30))
        .await
        .unwrap();

    let unknown = RefreshTokenId(token_codec().encode(999));
    let result = repository
        .replace(&unknown, now, now + Duration::days(30))
        .await;
    assert!(matches!(result, Err(AuthError::NotFound(_))));

    assert_eq!(repository.list(&account).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_by_account_revokes_everything() {
    let repository = InMemoryRefreshTokenRepository::new(token_codec());
    let account = account(1);

    let base = Utc::now();
    for i in 0..3 {
        let created_at = base + Duration::seconds(i);
        repository
            .add(&account, created_at, created_at + Duration::days(30))
            .await
            .unwrap();
    }

    let removed = repository.delete_by_account(&account).await.unwrap();
    assert_eq!(removed.len(), 3);
    assert!(repository.list(&account).await.unwrap().is_empty());
}
