//! User account handlers: registration, login, profile, avatar.

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use scribe_core::domain::{User, normalize_email};
use scribe_core::ports::{
    BaseRepository, MediaStore, PasswordService, TokenService, UserRepository,
};
use scribe_shared::dto::{
    EditUserRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload::UploadForm;

/// Avatars are capped well below post thumbnails.
const MAX_AVATAR_BYTES: usize = 500_000;

const MIN_PASSWORD_CHARS: usize = 6;

/// Treat absent and empty-string fields the same way.
fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// POST /api/users/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let (Some(name), Some(email), Some(password)) =
        (filled(&req.name), filled(&req.email), filled(&req.password))
    else {
        return Err(AppError::Validation(
            "Fill the details in All Required Field".to_string(),
        ));
    };

    let email = normalize_email(email);
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Validation("Email Already Exits".to_string()));
    }

    if password.trim().chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    if req.password2.as_deref() != Some(password) {
        return Err(AppError::Validation(
            "Password and Confirm password should be the same".to_string(),
        ));
    }

    let password_hash = password_service.hash(password)?;
    let user = state
        .users
        .insert(User::new(name.to_owned(), email, password_hash))
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("New user {} registered", user.email),
    }))
}

/// POST /api/users/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let (Some(email), Some(password)) = (filled(&req.email), filled(&req.password)) else {
        return Err(AppError::Validation(
            "Email and Password are required".to_string(),
        ));
    };

    // An unknown email and a wrong password fail identically.
    let email = normalize_email(email);
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service.verify(password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service.issue(user.id, &user.name)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        id: user.id,
        name: user.name,
    }))
}

/// GET /api/users/{id} - Protected
pub async fn get_user(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Validation("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /api/users - list authors, password hash excluded.
pub async fn get_authors(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let authors: Vec<UserResponse> = state
        .users
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(authors))
}

/// POST /api/users/change-avatar - Protected
///
/// The new file is stored before the old one is removed; removal is
/// best-effort so a leftover file never fails the request.
pub async fn change_avatar(
    identity: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = UploadForm::read(payload, MAX_AVATAR_BYTES)
        .await
        .map_err(|e| e.into_app_error("File size is too big. Should be less than 500kb"))?;

    let Some(avatar) = form.take_file("avatar") else {
        return Err(AppError::Validation("Please choose an image".to_string()));
    };

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Validation("User not found".to_string()))?;

    let new_avatar = state.media.store(&avatar.original_name, &avatar.data).await?;
    if let Some(old) = &user.avatar {
        state.media.remove(old).await;
    }

    user.avatar = Some(new_avatar);
    user.updated_at = Utc::now();
    let updated = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// PATCH /api/users/edit-user - Protected
pub async fn edit_user(
    identity: Identity,
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<EditUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let (Some(name), Some(email), Some(current), Some(new), Some(confirm)) = (
        filled(&req.name),
        filled(&req.email),
        filled(&req.current_password),
        filled(&req.new_password),
        filled(&req.confirm_new_password),
    ) else {
        return Err(AppError::Validation(
            "Fill all the required fields".to_string(),
        ));
    };

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Validation("No user Found".to_string()))?;

    // The new email must not belong to anyone else.
    let email = normalize_email(email);
    if let Some(existing) = state.users.find_by_email(&email).await? {
        if existing.id != identity.user_id {
            return Err(AppError::Validation("Email Already Exist".to_string()));
        }
    }

    if !password_service.verify(current, &user.password_hash)? {
        return Err(AppError::Validation(
            "Invalid current password".to_string(),
        ));
    }
    if new != confirm {
        return Err(AppError::Validation(
            "New password does not match".to_string(),
        ));
    }

    user.name = name.to_owned();
    user.email = email;
    user.password_hash = password_service.hash(new)?;
    user.updated_at = Utc::now();
    let updated = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
