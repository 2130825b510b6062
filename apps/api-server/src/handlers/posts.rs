//! Post handlers: create, list, read, edit, delete.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::ports::{BaseRepository, MediaStore, PostRepository, UserRepository};
use scribe_shared::dto::{MessageResponse, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload::UploadForm;

// Thumbnail limits differ between creation and edit.
const MAX_THUMBNAIL_CREATE_BYTES: usize = 7_000_000;
const MAX_THUMBNAIL_EDIT_BYTES: usize = 2_000_000;

const MIN_DESCRIPTION_CHARS: usize = 12;

/// POST /api/posts - Protected
///
/// Multipart fields: title, category, description, plus the thumbnail file.
/// Creating a post bumps the author's post count.
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = UploadForm::read(payload, MAX_THUMBNAIL_CREATE_BYTES)
        .await
        .map_err(|e| e.into_app_error("Image is too big. File should be less than 7mb"))?;

    let title = form.text("title").map(str::to_owned);
    let category = form.text("category").map(str::to_owned);
    let description = form.text("description").map(str::to_owned);
    let thumbnail = form.take_file("thumbnail");

    let (Some(title), Some(category), Some(description), Some(thumbnail)) =
        (title, category, description, thumbnail)
    else {
        return Err(AppError::Validation(
            "Fill all the details and choose the thumbnail".to_string(),
        ));
    };

    let filename = state
        .media
        .store(&thumbnail.original_name, &thumbnail.data)
        .await?;

    let post = state
        .posts
        .insert(Post::new(
            title,
            category,
            description,
            filename,
            identity.user_id,
        ))
        .await?;

    state.users.adjust_post_count(identity.user_id, 1).await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// GET /api/posts - most recently updated first.
pub async fn get_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list_recent()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// GET /api/posts/categories/{category} - most recently created first.
pub async fn get_cat_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .find_by_category(&path.into_inner())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/users/{id} - most recently created first.
pub async fn get_user_posts(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .find_by_creator(path.into_inner())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// PATCH /api/posts/{id} - Protected
///
/// Any authenticated caller may edit a post; only deletion checks ownership.
/// A replacement thumbnail supersedes the old file, whose removal is
/// best-effort.
pub async fn edit_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let mut form = UploadForm::read(payload, MAX_THUMBNAIL_EDIT_BYTES)
        .await
        .map_err(|e| e.into_app_error("Thumbnail is too big. File size must be less than 2mb"))?;

    let title = form.text("title").map(str::to_owned);
    let category = form.text("category").map(str::to_owned);
    let description = form
        .text("description")
        .filter(|d| d.chars().count() >= MIN_DESCRIPTION_CHARS)
        .map(str::to_owned);
    let new_thumbnail = form.take_file("thumbnail");

    let (Some(title), Some(category), Some(description)) = (title, category, description) else {
        return Err(AppError::Validation(
            "Fill in all the fields and ensure description is at least 12 characters long"
                .to_string(),
        ));
    };

    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if let Some(file) = new_thumbnail {
        let filename = state.media.store(&file.original_name, &file.data).await?;
        state.media.remove(&post.thumbnail).await;
        post.thumbnail = filename;
    }

    post.title = title;
    post.category = category;
    post.description = description;
    post.updated_at = Utc::now();
    let updated = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(updated)))
}

/// DELETE /api/posts/{id} - Protected, creator only.
///
/// The thumbnail removal is best-effort and must not block the record
/// deletion or the post count decrement.
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.creator != identity.user_id {
        return Err(AppError::Forbidden);
    }

    state.media.remove(&post.thumbnail).await;
    state.posts.delete(post_id).await?;
    state.users.adjust_post_count(identity.user_id, -1).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Post {post_id} deleted successfully"),
    }))
}
