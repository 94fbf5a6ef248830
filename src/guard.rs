use crate::{
    error::{AppError, AppResult},
    models::{Role, User},
    session::SessionStore,
};

pub fn ensure_role(user: &User, role: Role) -> AppResult<()> {
    if user.role != role {
        return Err(AppError::Forbidden(format!(
            "This action requires the {} role",
            role.as_str()
        )));
    }
    Ok(())
}

pub fn ensure_admin(user: &User) -> AppResult<()> {
    ensure_role(user, Role::Admin)
}

/// The signed-in profile from the session store.
pub async fn current_user(session: &SessionStore) -> AppResult<User> {
    session
        .user()
        .await
        .ok_or_else(|| AppError::Unauthorized("Please log in to continue".into()))
}

pub async fn require_admin(session: &SessionStore) -> AppResult<User> {
    let user = current_user(session).await?;
    ensure_admin(&user)?;
    Ok(user)
}
