//! Integration tests for token persistence and lookup.

use chrono::{Duration, Utc};
use fitlog_core::tokens::{generate_token, hash_token, scopes};
use fitlog_db::models::token::CreateToken;
use fitlog_db::models::user::CreateUser;
use fitlog_db::repositories::{TokenRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            bio: String::new(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn store_token(pool: &PgPool, user_id: i64, scope: &str, ttl: Duration) -> String {
    let token = generate_token().unwrap();
    TokenRepo::create(
        pool,
        &CreateToken {
            hash: token.hash.clone(),
            user_id,
            expiry: Utc::now() + ttl,
            scope: scope.to_string(),
        },
    )
    .await
    .unwrap();
    token.plaintext
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_live_token_resolves_user(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let plaintext = store_token(&pool, user_id, scopes::AUTHENTICATION, Duration::hours(24)).await;

    let user = TokenRepo::find_user_for_token(&pool, scopes::AUTHENTICATION, &hash_token(&plaintext))
        .await
        .unwrap()
        .expect("token should resolve");
    assert_eq!(user.id, user_id);
    assert_eq!(user.username, "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_token_does_not_resolve(pool: PgPool) {
    let user_id = seed_user(&pool, "bob").await;
    let plaintext = store_token(&pool, user_id, scopes::AUTHENTICATION, Duration::seconds(-1)).await;

    let user = TokenRepo::find_user_for_token(&pool, scopes::AUTHENTICATION, &hash_token(&plaintext))
        .await
        .unwrap();
    assert!(user.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_scope_does_not_resolve(pool: PgPool) {
    let user_id = seed_user(&pool, "carol").await;
    let plaintext = store_token(&pool, user_id, "password-reset", Duration::hours(1)).await;

    let user = TokenRepo::find_user_for_token(&pool, scopes::AUTHENTICATION, &hash_token(&plaintext))
        .await
        .unwrap();
    assert!(user.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_altered_hash_does_not_resolve(pool: PgPool) {
    let user_id = seed_user(&pool, "dave").await;
    let plaintext = store_token(&pool, user_id, scopes::AUTHENTICATION, Duration::hours(1)).await;

    let mut hash = hash_token(&plaintext);
    hash[0] ^= 0x01;
    let user = TokenRepo::find_user_for_token(&pool, scopes::AUTHENTICATION, &hash)
        .await
        .unwrap();
    assert!(user.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reissue_adds_row_and_delete_all_revokes(pool: PgPool) {
    let user_id = seed_user(&pool, "erin").await;
    let other = seed_user(&pool, "frank").await;
    let first = store_token(&pool, user_id, scopes::AUTHENTICATION, Duration::hours(1)).await;
    let second = store_token(&pool, user_id, scopes::AUTHENTICATION, Duration::hours(1)).await;
    let others = store_token(&pool, other, scopes::AUTHENTICATION, Duration::hours(1)).await;
    assert_ne!(first, second);

    let stored = TokenRepo::list_for_user(&pool, user_id, scopes::AUTHENTICATION)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|t| t.hash.len() == 32));

    let removed = TokenRepo::delete_all_for_user(&pool, user_id, scopes::AUTHENTICATION)
        .await
        .unwrap();
    assert_eq!(removed, 2);

    for plaintext in [&first, &second] {
        let user = TokenRepo::find_user_for_token(&pool, scopes::AUTHENTICATION, &hash_token(plaintext))
            .await
            .unwrap();
        assert!(user.is_none());
    }
    let still_live = TokenRepo::find_user_for_token(&pool, scopes::AUTHENTICATION, &hash_token(&others))
        .await
        .unwrap();
    assert!(still_live.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_user_removes_tokens(pool: PgPool) {
    let user_id = seed_user(&pool, "grace").await;
    store_token(&pool, user_id, scopes::AUTHENTICATION, Duration::hours(1)).await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let stored = TokenRepo::list_for_user(&pool, user_id, scopes::AUTHENTICATION)
        .await
        .unwrap();
    assert!(stored.is_empty());
}
