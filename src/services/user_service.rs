use reqwest::multipart::{Form, Part};

use crate::{
    client::{ApiClient, Auth},
    dto::user::UpdateProfileRequest,
    error::{AppError, AppResult},
    models::User,
    validation::{Field, ValidationErrors, is_valid_email},
};

pub const PICTURE_FIELD: &str = "file";

/// Fetches the profile and refreshes the cached copy.
pub async fn profile(api: &ApiClient) -> AppResult<User> {
    let user: User = api.get("user", Auth::Session).await?;
    api.session().store_user(&user).await;
    Ok(user)
}

pub async fn update_profile(api: &ApiClient, payload: UpdateProfileRequest) -> AppResult<User> {
    let mut errors = ValidationErrors::new();
    if let Some(name) = &payload.name {
        errors.require(Field::Name, name, "Name cannot be empty");
    }
    if payload.email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        errors.add(Field::Email, "Please enter a valid email address");
    }
    errors.into_result()?;

    let user: User = api.put("user", &payload, Auth::Session).await?;
    api.session().store_user(&user).await;
    tracing::info!(user_id = user.id, "profile updated");
    Ok(user)
}

pub async fn upload_picture(
    api: &ApiClient,
    bytes: Vec<u8>,
    file_name: &str,
    mime: &str,
) -> AppResult<User> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(|_| {
            AppError::Validation(ValidationErrors::single(
                Field::Picture,
                format!("Unsupported image type \"{mime}\""),
            ))
        })?;
    let form = Form::new().part(PICTURE_FIELD, part);

    let user: User = api.upload("user/upload-picture", form, Auth::Session).await?;
    api.session().store_user(&user).await;
    Ok(user)
}
