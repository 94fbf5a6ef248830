use crate::{
    client::{ApiClient, Auth},
    dto::auth::{AuthTokens, LoginRequest, SignupRequest},
    error::AppResult,
    models::User,
};

pub async fn login(api: &ApiClient, payload: LoginRequest) -> AppResult<User> {
    payload.validate()?;
    let tokens: AuthTokens = api.post("auth/login", &payload, Auth::Anonymous).await?;
    let user = establish_session(api, tokens).await?;
    tracing::info!(user_id = user.id, role = user.role.as_str(), "logged in");
    Ok(user)
}

pub async fn signup(api: &ApiClient, payload: SignupRequest) -> AppResult<User> {
    payload.validate()?;
    let tokens: AuthTokens = api.post("auth/signup", &payload, Auth::Anonymous).await?;
    let user = establish_session(api, tokens).await?;
    tracing::info!(user_id = user.id, "signed up");
    Ok(user)
}

pub async fn logout(api: &ApiClient) {
    api.session().remove_tokens().await;
    tracing::info!("logged out");
}

// The session is written only after the profile fetch succeeds, so a
// failure anywhere leaves the previous session untouched.
async fn establish_session(api: &ApiClient, tokens: AuthTokens) -> AppResult<User> {
    let user: User = api.get("user", Auth::Token(&tokens.access_token)).await?;
    api.session()
        .store_tokens(&tokens.access_token, &tokens.refresh_token, &user)
        .await;
    Ok(user)
}
