//! Integration tests for the full authentication and authorization flow.

use std::sync::Arc;

use chrono::{Duration, Utc};

use lectoria_auth::gateway::{AuthError, AuthGateway, Credential};
use lectoria_auth::rbac;
use lectoria_auth::store::{MemoryUserStore, UserStore};
use lectoria_core::config::auth::AuthConfig;
use lectoria_core::error::ApiErrorCode;
use lectoria_core::types::IdentityKey;
use lectoria_entity::role::{Permission, Role};
use lectoria_entity::user::User;

fn test_config(ttl_seconds: u64) -> AuthConfig {
    AuthConfig {
        secret_key: "integration-test-secret".into(),
        issuer: "localhost".into(),
        access_token_ttl_seconds: ttl_seconds,
    }
}

async fn gateway_with_user(ttl_seconds: u64, key: IdentityKey) -> (AuthGateway, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(User::register(key, None, Utc::now())).await;
    let gateway = AuthGateway::new(test_config(ttl_seconds), store.clone());
    (gateway, store)
}

#[tokio::test]
async fn test_mint_verify_resolve_yields_principal() {
    // Scenario A: fresh token for a stored user resolves to that user's role.
    let key = IdentityKey::from_u64(1);
    let (gateway, _store) = gateway_with_user(3600, key).await;

    let now = Utc::now();
    let (token, expires_at) = gateway.issue_token(key, now);
    assert!(expires_at > now);

    let principal = gateway
        .authenticate(Some(Credential::from_token(token)), now)
        .await
        .expect("should authenticate");
    assert_eq!(principal.identity_key, key);
    assert!(principal.role.permits(Permission::BuyCourses));
}

#[tokio::test]
async fn test_deleted_user_is_integrity_failure() {
    // Scenario B: the token outlives the record — a broken invariant.
    let key = IdentityKey::from_u64(2);
    let (gateway, store) = gateway_with_user(3600, key).await;

    let now = Utc::now();
    let (token, _) = gateway.issue_token(key, now);
    store.remove(key).await;

    let err = gateway
        .authenticate(Some(Credential::from_token(token)), now)
        .await
        .expect_err("must fail");
    assert!(matches!(err, AuthError::IntegrityFailure));
    // Clients only ever see the generic invalid-token code.
    assert_eq!(err.client_code(), ApiErrorCode::AuthInvalidToken);
}

#[tokio::test]
async fn test_short_ttl_token_expires() {
    // Scenario C: ttl=1, checked 2 seconds later.
    let key = IdentityKey::from_u64(3);
    let (gateway, _store) = gateway_with_user(1, key).await;

    let now = Utc::now();
    let (token, _) = gateway.issue_token(key, now);

    let err = gateway
        .authenticate(
            Some(Credential::from_token(token)),
            now + Duration::seconds(2),
        )
        .await
        .expect_err("must fail");
    assert!(matches!(err, AuthError::Expired));
    assert_eq!(err.client_code(), ApiErrorCode::AuthExpiredToken);
}

#[tokio::test]
async fn test_purchase_composite_rule() {
    // Scenario D: base buy flag set, free-purchase override unset.
    let key = IdentityKey::from_u64(4);
    let (gateway, store) = gateway_with_user(3600, key).await;

    let mut role = Role::default_role();
    role.buy_courses = true;
    role.buy_courses_for_free = false;
    store.set_role(key, role).await;

    let now = Utc::now();
    let (token, _) = gateway.issue_token(key, now);
    let principal = gateway
        .authenticate(Some(Credential::from_token(token)), now)
        .await
        .expect("should authenticate");

    assert!(rbac::require_purchase(&principal, 4900).is_err());
    assert!(rbac::require_purchase(&principal, 0).is_ok());
}

#[tokio::test]
async fn test_header_credential_is_authoritative() {
    // Scenario E: different values on both channels — the header's is used.
    let key = IdentityKey::from_u64(5);
    let (gateway, _store) = gateway_with_user(3600, key).await;

    let now = Utc::now();
    let (good_token, _) = gateway.issue_token(key, now);
    let credential = Credential::from_parts(Some(good_token.as_str()), Some("garbage-query-token"));
    assert!(
        gateway
            .authenticate(credential, now)
            .await
            .is_ok()
    );

    // Swapped: garbage in the header must lose, even with a good query value.
    let credential = Credential::from_parts(Some("garbage-header-token"), Some(good_token.as_str()));
    let err = gateway
        .authenticate(credential, now)
        .await
        .expect_err("header garbage must fail");
    assert!(matches!(err, AuthError::MalformedToken));
}

#[tokio::test]
async fn test_missing_credential_is_auth_required() {
    let key = IdentityKey::from_u64(6);
    let (gateway, _store) = gateway_with_user(3600, key).await;

    let err = gateway
        .authenticate(Credential::from_parts(None, None), Utc::now())
        .await
        .expect_err("must fail");
    assert!(matches!(err, AuthError::MissingCredential));
    assert_eq!(err.client_code(), ApiErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_foreign_signed_token_is_rejected() {
    let key = IdentityKey::from_u64(7);
    let (gateway, store) = gateway_with_user(3600, key).await;

    // Same store, different signing authority.
    let foreign = AuthGateway::new(
        AuthConfig {
            secret_key: "somebody-elses-secret".into(),
            issuer: "localhost".into(),
            access_token_ttl_seconds: 3600,
        },
        store.clone() as Arc<dyn UserStore>,
    );

    let now = Utc::now();
    let (token, _) = foreign.issue_token(key, now);
    let err = gateway
        .authenticate(Some(Credential::from_token(token)), now)
        .await
        .expect_err("must fail");
    assert!(matches!(err, AuthError::SignatureInvalid));
    assert_eq!(err.client_code(), ApiErrorCode::AuthInvalidToken);
}

#[tokio::test]
async fn test_permission_gated_operation() {
    let key = IdentityKey::from_u64(8);
    let (gateway, store) = gateway_with_user(3600, key).await;

    let now = Utc::now();
    let (token, _) = gateway.issue_token(key, now);

    let err = gateway
        .authenticate_with_permission(
            Some(Credential::from_token(token.clone())),
            Permission::ManageRoles,
            now,
        )
        .await
        .expect_err("default role must be denied");
    assert!(matches!(
        err,
        AuthError::PermissionDenied(Permission::ManageRoles)
    ));
    assert_eq!(err.client_code(), ApiErrorCode::Forbidden);

    let mut role = Role::default_role();
    role.manage_roles = true;
    store.set_role(key, role).await;

    gateway
        .authenticate_with_permission(
            Some(Credential::from_token(token)),
            Permission::ManageRoles,
            now,
        )
        .await
        .expect("granted role must pass");
}

#[tokio::test]
async fn test_best_effort_mode_collapses_failures() {
    let key = IdentityKey::from_u64(9);
    let (gateway, store) = gateway_with_user(3600, key).await;

    let now = Utc::now();

    // Anonymous, malformed, and integrity-broken all look the same: None.
    assert!(gateway.try_authenticate(None, now).await.is_none());
    assert!(
        gateway
            .try_authenticate(Some(Credential::from_token("not.a.token")), now)
            .await
            .is_none()
    );

    let (token, _) = gateway.issue_token(key, now);
    assert!(
        gateway
            .try_authenticate(Some(Credential::from_token(token.clone())), now)
            .await
            .is_some()
    );

    store.remove(key).await;
    assert!(
        gateway
            .try_authenticate(Some(Credential::from_token(token)), now)
            .await
            .is_none()
    );
}
