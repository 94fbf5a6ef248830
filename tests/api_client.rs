mod common;

use std::time::Duration;

use storefront_client::{
    client::{Auth, REQUEST_ID_HEADER},
    config::AppConfig,
    dto::{
        auth::{LoginRequest, SignupRequest},
        user::UpdateProfileRequest,
    },
    error::AppError,
    models::{Category, Role},
    validation::Field,
    services::{admin_service, auth_service, catalog_service, order_service, user_service},
};

use common::{app_state, dead_base_url, spawn_backend};

fn credentials(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn login_persists_session_and_attaches_bearer_afterwards() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let user = auth_service::login(&state.api, credentials("user@example.com", "secret")).await?;
    assert_eq!(user.role, Role::Member);

    let session = state.session.load().await.expect("session stored");
    assert_eq!(session.access_token, "access-member");
    assert_eq!(session.refresh_token, "refresh-token");
    assert_eq!(session.user, user);

    let login = backend.seen_path("/auth/login").expect("login request");
    assert_eq!(login.authorization, None);
    assert!(login.request_id.is_some(), "{REQUEST_ID_HEADER} missing");

    let profile = backend.seen_path("/user").expect("profile request");
    assert_eq!(profile.authorization.as_deref(), Some("Bearer access-member"));

    let categories = catalog_service::list_categories(&state.api).await?;
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].image_url, None);
    let listed = backend
        .seen_path("/categories/listAll")
        .expect("categories request");
    assert_eq!(listed.authorization.as_deref(), Some("Bearer access-member"));
    Ok(())
}

#[tokio::test]
async fn guests_browse_without_authorization_header() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let products = catalog_service::products_by_category(&state.api, 3).await?;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].category_id, Some(3));

    let seen = backend
        .seen_path("/products/searchByCategoryId/3")
        .expect("products request");
    assert_eq!(seen.authorization, None);
    Ok(())
}

#[tokio::test]
async fn invalid_credentials_surface_server_message_and_keep_session() -> anyhow::Result<()> {
    let (base_url, _backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let err = auth_service::login(&state.api, credentials("user@example.com", "wrong"))
        .await
        .expect_err("wrong password");

    assert!(matches!(err, AppError::Unauthorized(_)), "{err:?}");
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(state.session.load().await.is_none());
    Ok(())
}

#[tokio::test]
async fn signup_duplicate_email_is_shown_verbatim() -> anyhow::Result<()> {
    let (base_url, _backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let err = auth_service::signup(
        &state.api,
        SignupRequest {
            name: "Taken".into(),
            email: "taken@example.com".into(),
            password: "secret123".into(),
            phone: None,
        },
    )
    .await
    .expect_err("duplicate email");

    match &err {
        AppError::Server { status, message } => {
            assert_eq!(*status, 409);
            assert_eq!(message, "Email already exists");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.user_message(), "Email already exists");
    assert!(state.session.access_token().await.is_none());
    Ok(())
}

#[tokio::test]
async fn signup_logs_the_new_user_in() -> anyhow::Result<()> {
    let (base_url, _backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let user = auth_service::signup(
        &state.api,
        SignupRequest {
            name: "Minh Nguyen".into(),
            email: "new@example.com".into(),
            password: "secret123".into(),
            phone: Some("0901234567".into()),
        },
    )
    .await?;

    assert_eq!(state.session.user().await, Some(user));
    Ok(())
}

#[tokio::test]
async fn invalid_forms_fail_before_any_request() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let err = auth_service::login(&state.api, credentials("user@example.com", ""))
        .await
        .expect_err("empty password");
    assert!(matches!(err, AppError::Validation(_)));

    let err = order_service::find_voucher(&state.api, "  ")
        .await
        .expect_err("empty voucher code");
    assert!(matches!(err, AppError::Validation(_)));

    assert!(backend.seen().is_empty());
    Ok(())
}

#[tokio::test]
async fn slow_backend_times_out() -> anyhow::Result<()> {
    let (base_url, _backend) = spawn_backend().await?;
    let mut config = AppConfig::new(&base_url);
    config.http_timeout = Duration::from_millis(300);
    let state = app_state(config)?;

    let err = state
        .api
        .get::<Vec<Category>>("slow", Auth::Session)
        .await
        .expect_err("should time out");
    assert!(matches!(err, AppError::Timeout), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> anyhow::Result<()> {
    let state = app_state(AppConfig::new(dead_base_url().await?))?;

    let err = auth_service::login(&state.api, credentials("user@example.com", "secret"))
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, AppError::Network(_)), "{err:?}");
    assert!(state.session.load().await.is_none());
    Ok(())
}

#[tokio::test]
async fn voucher_lookup() -> anyhow::Result<()> {
    let (base_url, _backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let voucher = order_service::find_voucher(&state.api, " SAVE20 ").await?;
    assert_eq!(voucher.discount, 20000);

    let err = order_service::find_voucher(&state.api, "NOPE")
        .await
        .expect_err("unknown voucher");
    assert_eq!(err.user_message(), "Voucher not found");
    Ok(())
}

#[tokio::test]
async fn combos_by_type_passes_the_query() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;

    let combos = catalog_service::combos_by_type(&state.api, "solo").await?;
    assert_eq!(combos[0].combo_type.as_deref(), Some("solo"));

    let seen = backend
        .seen_path("/combos/searchByType")
        .expect("combo request");
    assert_eq!(seen.query.as_deref(), Some("type=solo"));
    Ok(())
}

#[tokio::test]
async fn profile_updates_refresh_the_cached_user() -> anyhow::Result<()> {
    let (base_url, _backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;
    auth_service::login(&state.api, credentials("user@example.com", "secret")).await?;

    let updated = user_service::update_profile(
        &state.api,
        UpdateProfileRequest {
            name: Some("Minh Tran".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.name, "Minh Tran");
    assert_eq!(state.session.user().await.map(|u| u.name).as_deref(), Some("Minh Tran"));

    let with_avatar =
        user_service::upload_picture(&state.api, vec![1, 2, 3, 4], "me.png", "image/png").await?;
    assert_eq!(
        with_avatar.avatar_url.as_deref(),
        Some("https://cdn.example.com/avatar-4.png")
    );
    assert_eq!(state.session.user().await, Some(with_avatar));
    assert_eq!(
        state.session.access_token().await.as_deref(),
        Some("access-member")
    );
    Ok(())
}

#[tokio::test]
async fn malformed_picture_type_is_a_validation_error() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;
    auth_service::login(&state.api, credentials("user@example.com", "secret")).await?;

    let err = user_service::upload_picture(&state.api, vec![1, 2], "me.png", "not a mime")
        .await
        .expect_err("mime type is malformed");
    match &err {
        AppError::Validation(errors) => assert!(errors.contains(Field::Picture)),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.user_message(), "Please check the highlighted fields.");
    assert!(backend.seen_path("/user/upload-picture").is_none());
    Ok(())
}

#[tokio::test]
async fn members_are_stopped_before_admin_requests() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;
    auth_service::login(&state.api, credentials("user@example.com", "secret")).await?;

    let err = admin_service::list_users(&state.api)
        .await
        .expect_err("member is not admin");
    assert!(matches!(err, AppError::Forbidden(_)), "{err:?}");
    assert!(backend.seen_path("/admin/get-all-users").is_none());
    Ok(())
}

#[tokio::test]
async fn admins_manage_users_and_products() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;
    auth_service::login(&state.api, credentials("admin@example.com", "secret")).await?;

    let users = admin_service::list_users(&state.api).await?;
    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|u| u.role == Role::Admin));

    admin_service::delete_product(&state.api, 10).await?;
    let seen = backend
        .seen_path("/admin/products/10")
        .expect("delete request");
    assert_eq!(seen.method, "DELETE");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer access-admin"));
    Ok(())
}

#[tokio::test]
async fn logout_forgets_the_token() -> anyhow::Result<()> {
    let (base_url, backend) = spawn_backend().await?;
    let state = app_state(AppConfig::new(&base_url))?;
    auth_service::login(&state.api, credentials("user@example.com", "secret")).await?;

    auth_service::logout(&state.api).await;
    assert!(state.session.load().await.is_none());

    let err = user_service::profile(&state.api)
        .await
        .expect_err("no token after logout");
    assert!(err.is_auth_error());
    let last = backend.seen().pop().expect("profile request");
    assert_eq!(last.authorization, None);
    Ok(())
}
