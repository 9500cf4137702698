use chrono::Utc;

use wallify::management::{TOKEN_TTL_SECS, TokenStore, TokenStoreError};

#[tokio::test]
async fn test_issue_and_lookup() {
    let store = TokenStore::new();

    let key = store
        .issue("access-1".to_string(), "refresh-1".to_string())
        .await;

    let token = store.lookup(&key).await.unwrap();
    assert_eq!(token.access_token, "access-1");
    assert_eq!(token.refresh_token, "refresh-1");
    assert!(token.issued_at > 0);
}

#[tokio::test]
async fn test_lookup_unknown_key_fails() {
    let store = TokenStore::new();

    let result = store.lookup("no-such-key").await;
    assert!(matches!(result, Err(TokenStoreError::NotFound)));
}

#[tokio::test]
async fn test_issue_generates_distinct_keys() {
    let store = TokenStore::new();

    let key1 = store
        .issue("access-1".to_string(), "refresh-1".to_string())
        .await;
    let key2 = store
        .issue("access-2".to_string(), "refresh-2".to_string())
        .await;

    assert_ne!(key1, key2);
    assert_eq!(store.len().await, 2);

    // Each key resolves to its own entry
    assert_eq!(store.lookup(&key1).await.unwrap().access_token, "access-1");
    assert_eq!(store.lookup(&key2).await.unwrap().access_token, "access-2");
}

#[tokio::test]
async fn test_sweep_removes_only_expired_entries() {
    let store = TokenStore::new();
    let now = Utc::now().timestamp() as u64;

    // One entry just over the TTL, one comfortably inside it
    let expired_key = store
        .issue_at(
            "old-access".to_string(),
            "old-refresh".to_string(),
            now - TOKEN_TTL_SECS - 10,
        )
        .await;
    let fresh_key = store
        .issue_at(
            "new-access".to_string(),
            "new-refresh".to_string(),
            now - 3600,
        )
        .await;

    let removed = store.sweep().await;

    assert_eq!(removed, 1);
    assert!(matches!(
        store.lookup(&expired_key).await,
        Err(TokenStoreError::NotFound)
    ));
    assert!(store.lookup(&fresh_key).await.is_ok());
}

#[tokio::test]
async fn test_sweep_never_touches_young_entries() {
    let store = TokenStore::new();

    let key = store
        .issue("access-1".to_string(), "refresh-1".to_string())
        .await;

    // However often the sweeper fires, a young entry survives
    for _ in 0..5 {
        assert_eq!(store.sweep().await, 0);
    }
    assert!(store.lookup(&key).await.is_ok());
}
