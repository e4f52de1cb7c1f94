//! End-to-end session lifecycle against the in-memory backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use keygate_auth::{
    AuthError, Client, DefaultTokenGenerator, Expiry, Grant, Owner, Scope, Session, SessionStorage,
    SessionStore, Token, TokenConfig, TokenGenerator,
};
use keygate_auth_memory::{MemoryScopeStorage, MemorySessionStorage};
use time::OffsetDateTime;

struct AuthorizationCodeGrant {
    access_token_lifetime: Duration,
}

impl Grant for AuthorizationCodeGrant {
    fn grant_type(&self) -> &str {
        "authorization_code"
    }

    fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }
}

fn client() -> Arc<Client> {
    Arc::new(Client::new("app", "App", "https://app.example/cb"))
}

fn owner() -> Arc<Owner> {
    Arc::new(Owner::new("u1", "Alice"))
}

fn expired() -> Expiry {
    Expiry::At(OffsetDateTime::now_utc() - time::Duration::minutes(1))
}

fn valid() -> Expiry {
    Expiry::At(OffsetDateTime::now_utc() + time::Duration::hours(1))
}

fn new_store() -> (Arc<MemorySessionStorage>, SessionStore) {
    let storage = Arc::new(MemorySessionStorage::new());
    let store = SessionStore::new(storage.clone()).expect("inside a runtime");
    (storage, store)
}

#[tokio::test]
async fn test_minted_session_round_trip() {
    let (_, store) = new_store();
    let config = TokenConfig::from_secs(3600, 1_209_600);
    let generator = DefaultTokenGenerator::new();
    let grant = AuthorizationCodeGrant {
        access_token_lifetime: Duration::ZERO,
    };

    let scopes = MemoryScopeStorage::new();
    scopes.add_scope(Scope::new("1", "read"));

    let access = generator.generate_access_token(&config, &grant);
    let refresh = generator.generate_refresh_token(&config, &grant);
    let session = Session::new(client(), owner(), access.clone())
        .with_refresh_token(refresh.clone())
        .with_authorization_code()
        .with_scope(scopes.get("read").unwrap())
        .with_extra("redirect_uri", "https://app.example/cb")
        .with_extra("state", "xyz");
    store.save(&session).await.unwrap();

    let found = store.find_by_access_token(&access.value).await.unwrap();
    assert_eq!(found, session);
    assert_eq!(found.extra_data["state"], "xyz");

    let found = store.find_by_refresh_token(&refresh.value).await.unwrap();
    assert_eq!(found, session);
}

#[tokio::test]
async fn test_zero_grant_override_expires_after_default() {
    let config = TokenConfig::from_secs(3600, 1_209_600);
    let grant = AuthorizationCodeGrant {
        access_token_lifetime: Duration::ZERO,
    };

    let before = OffsetDateTime::now_utc().unix_timestamp();
    let token = DefaultTokenGenerator::new().generate_access_token(&config, &grant);
    let after = OffsetDateTime::now_utc().unix_timestamp();

    let expires = token.expires.unix();
    assert!(expires >= before + 3600 && expires <= after + 3600);
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_both_tokens_resolve_to_same_session() {
    let (_, store) = new_store();
    let session = Session::new(client(), owner(), Token::new("A1", valid()))
        .with_refresh_token(Token::new("R1", valid()));
    store.save(&session).await.unwrap();

    let by_access = store.find_by_access_token("A1").await.unwrap();
    let by_refresh = store.find_by_refresh_token("R1").await.unwrap();
    assert_eq!(by_access.id, session.id);
    assert_eq!(by_refresh.id, session.id);
}

#[tokio::test]
async fn test_expired_access_token_requires_refresh() {
    let (storage, store) = new_store();
    let session = Session::new(client(), owner(), Token::new("A1", expired()))
        .with_refresh_token(Token::new("R1", valid()));
    store.save(&session).await.unwrap();

    let err = store.find_by_access_token("A1").await.unwrap_err();
    assert!(matches!(err, AuthError::AccessTokenExpired));
    assert_eq!(err.oauth_error_code(), "invalid_token");

    store.flush_evictions().await;
    assert_eq!(storage.access_index_len().await, 1);
    assert_eq!(
        store.find_by_refresh_token("R1").await.unwrap().id,
        session.id
    );
}

#[tokio::test]
async fn test_dead_session_is_evicted_from_both_indexes() {
    let (storage, store) = new_store();
    let session = Session::new(client(), owner(), Token::new("A1", expired()))
        .with_refresh_token(Token::new("R1", expired()));
    store.save(&session).await.unwrap();

    let err = store.find_by_access_token("A1").await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
    assert_eq!(err.oauth_error_code(), "invalid_grant");

    store.flush_evictions().await;
    assert!(store.find_by_access_token("A1").await.unwrap_err().is_not_found());
    assert!(store.find_by_refresh_token("R1").await.unwrap_err().is_not_found());
    assert_eq!(storage.access_index_len().await, 0);
    assert_eq!(storage.refresh_index_len().await, 0);
}

#[tokio::test]
async fn test_expired_refresh_token_is_evicted() {
    let (storage, store) = new_store();
    let session = Session::new(client(), owner(), Token::new("A1", valid()))
        .with_refresh_token(Token::new("R1", expired()));
    store.save(&session).await.unwrap();

    let err = store.find_by_refresh_token("R1").await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));

    store.flush_evictions().await;
    assert!(store.find_by_access_token("A1").await.unwrap_err().is_not_found());
    assert!(storage.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_stale_eviction_spares_rotated_session() {
    let (_, store) = new_store();
    let stale = Session::new(client(), owner(), Token::new("A1", valid()))
        .with_refresh_token(Token::new("R1", expired()));
    store.save(&stale).await.unwrap();

    let err = store.find_by_refresh_token("R1").await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));

    let mut rotated = stale.clone();
    rotated.refresh_token = Some(Token::new("R2", valid()));
    store.save(&rotated).await.unwrap();
    store.delete(&stale).await.unwrap();
    store.flush_evictions().await;

    assert_eq!(store.find_by_refresh_token("R2").await.unwrap(), rotated);
    assert_eq!(store.find_by_access_token("A1").await.unwrap(), rotated);
}

#[tokio::test]
async fn test_non_expiring_session_always_resolves() {
    let (_, store) = new_store();
    let session = Session::new(client(), owner(), Token::non_expiring("A1"))
        .with_refresh_token(Token::non_expiring("R1"));
    store.save(&session).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(store.find_by_access_token("A1").await.is_ok());
    assert!(store.find_by_refresh_token("R1").await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_delete_races_with_eviction() {
    let (storage, store) = new_store();
    let store = Arc::new(store);
    let session = Session::new(client(), owner(), Token::new("A1", expired()))
        .with_refresh_token(Token::new("R1", expired()));
    store.save(&session).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            match i % 3 {
                0 => store.delete(&session).await,
                1 => store.find_by_access_token("A1").await.map(|_| ()),
                _ => store.find_by_refresh_token("R1").await.map(|_| ()),
            }
        }));
    }

    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => {}
            Err(e) => assert!(e.is_not_found() || matches!(e, AuthError::SessionExpired)),
        }
    }

    store.flush_evictions().await;
    assert_eq!(store.eviction_stats().failed, 0);
    assert_eq!(storage.access_index_len().await, 0);
    assert_eq!(storage.refresh_index_len().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_saves_do_not_cross_contaminate() {
    let (storage, store) = new_store();
    let store = Arc::new(store);

    let writers: Vec<_> = ["a", "b"]
        .into_iter()
        .map(|prefix| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut saved = Vec::with_capacity(1000);
                for i in 0..1000 {
                    let session = Session::new(
                        client(),
                        owner(),
                        Token::non_expiring(format!("{prefix}-access-{i}")),
                    )
                    .with_refresh_token(Token::non_expiring(format!("{prefix}-refresh-{i}")));
                    store.save(&session).await.unwrap();
                    saved.push(session);
                }
                saved
            })
        })
        .collect();

    let mut all = Vec::new();
    for writer in writers {
        all.extend(writer.await.unwrap());
    }
    assert_eq!(all.len(), 2000);
    assert_eq!(storage.access_index_len().await, 2000);
    assert_eq!(storage.refresh_index_len().await, 2000);

    for session in &all {
        let by_access = store
            .find_by_access_token(&session.access_token.value)
            .await
            .unwrap();
        let refresh = session.refresh_token.as_ref().unwrap();
        let by_refresh = store.find_by_refresh_token(&refresh.value).await.unwrap();
        assert_eq!(&by_access, session);
        assert_eq!(by_refresh.id, session.id);
    }
}

#[tokio::test]
async fn test_shutdown_completes_pending_evictions() {
    let (storage, store) = new_store();
    for i in 0..10 {
        let session = Session::new(client(), owner(), Token::new(format!("A{i}"), expired()));
        store.save(&session).await.unwrap();
        let _ = store.find_by_access_token(&format!("A{i}")).await;
    }

    store.shutdown().await;
    assert_eq!(store.eviction_stats().evicted, 10);
    assert_eq!(storage.access_index_len().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_half_applied_save() {
    const ROTATIONS: u32 = 2000;

    let (_, store) = new_store();
    let store = Arc::new(store);
    let base = Session::new(client(), owner(), Token::non_expiring("A0"))
        .with_refresh_token(Token::non_expiring("R0"));
    store.save(&base).await.unwrap();

    let current = Arc::new(AtomicU32::new(0));
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = store.clone();
        let current = current.clone();
        let done = done.clone();
        let base = base.clone();
        tokio::spawn(async move {
            for i in 1..=ROTATIONS {
                let mut next = base.clone();
                next.access_token = Token::non_expiring(format!("A{i}"));
                next.refresh_token = Some(Token::non_expiring(format!("R{i}")));
                store.save(&next).await.unwrap();
                current.store(i, Ordering::Release);
                tokio::task::yield_now().await;
            }
            done.store(true, Ordering::Release);
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let store = store.clone();
            let current = current.clone();
            let done = done.clone();
            let id = base.id;
            tokio::spawn(async move {
                while !done.load(Ordering::Acquire) {
                    let i = current.load(Ordering::Acquire);
                    let access = format!("A{i}");
                    let refresh = format!("R{i}");

                    match store.find_by_access_token(&access).await {
                        Ok(found) => {
                            assert_eq!(found.id, id);
                            assert_eq!(
                                found.refresh_token.as_ref().map(|t| t.value.as_str()),
                                Some(refresh.as_str())
                            );
                        }
                        Err(e) => assert!(e.is_not_found(), "unexpected error: {e}"),
                    }

                    match store.find_by_refresh_token(&refresh).await {
                        Ok(found) => {
                            assert_eq!(found.id, id);
                            assert_eq!(found.access_token.value, access);
                        }
                        Err(e) => assert!(e.is_not_found(), "unexpected error: {e}"),
                    }
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let last = store
        .find_by_access_token(&format!("A{ROTATIONS}"))
        .await
        .unwrap();
    assert_eq!(
        last.refresh_token.map(|t| t.value),
        Some(format!("R{ROTATIONS}"))
    );
    assert!(store.find_by_refresh_token("R0").await.unwrap_err().is_not_found());
}
