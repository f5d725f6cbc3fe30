/// Post handlers - HTTP endpoints for the post workflow
///
/// - POST   /api/v1/posts                       create post (multipart)
/// - GET    /api/v1/members/{member_id}/posts   list posts by member
/// - PATCH  /api/v1/posts/{post_id}             update post (multipart)
/// - DELETE /api/v1/posts/{post_id}             delete post
/// - DELETE /api/v1/posts/{post_id}/image       remove post image
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{ImageUpload, PostListResponse};
use crate::services::PostService;

/// Text fields plus the optional image file carried by the create/update
/// multipart forms.
#[derive(Debug, Default)]
struct PostForm {
    member_id: Option<Uuid>,
    title: Option<String>,
    contents: Option<String>,
    image: Option<ImageUpload>,
}

async fn read_post_form(mut payload: Multipart) -> Result<PostForm> {
    let mut form = PostForm::default();

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::Validation(format!("multipart error: {}", e)))?;

        let field_name = field.name().to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes =
                chunk.map_err(|e| AppError::Validation(format!("multipart read error: {}", e)))?;
            data.extend_from_slice(&bytes);
        }

        match field_name.as_str() {
            "member_id" => {
                let raw = utf8_field(data, "member_id")?;
                let id = raw
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation("member_id must be a UUID".into()))?;
                form.member_id = Some(id);
            }
            "title" => form.title = Some(utf8_field(data, "title")?),
            "contents" => form.contents = Some(utf8_field(data, "contents")?),
            "image" => {
                let file_name = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or("image")
                    .to_string();
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: data,
                });
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    Ok(form)
}

/// Decode a text field strictly; malformed input is rejected, not mangled.
fn utf8_field(data: Vec<u8>, name: &str) -> Result<String> {
    String::from_utf8(data)
        .map_err(|_| AppError::Validation(format!("{} must be valid UTF-8", name)))
}

fn require_text(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} must not be empty", name))),
    }
}

/// Create a new post
/// POST /api/v1/posts
pub async fn create_post(
    service: web::Data<PostService>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_post_form(payload).await?;

    let member_id = form
        .member_id
        .ok_or_else(|| AppError::Validation("member_id is required".into()))?;
    let title = require_text(form.title, "title")?;
    let contents = require_text(form.contents, "contents")?;

    let view = service
        .create_post(member_id, &title, &contents, form.image)
        .await?;

    Ok(HttpResponse::Created().json(view))
}

/// List posts by member
/// GET /api/v1/members/{member_id}/posts
pub async fn list_member_posts(
    service: web::Data<PostService>,
    member_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let posts = service.list_by_member(*member_id).await?;

    Ok(HttpResponse::Ok().json(PostListResponse { posts }))
}

/// Update a post
/// PATCH /api/v1/posts/{post_id}
pub async fn update_post(
    service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_post_form(payload).await?;

    let title = require_text(form.title, "title")?;
    let contents = require_text(form.contents, "contents")?;

    let view = service
        .update_post(*post_id, &title, &contents, form.image)
        .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// Delete a post
/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    service.delete_post(*post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Remove only the image from a post
/// DELETE /api/v1/posts/{post_id}/image
pub async fn remove_post_image(
    service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let view = service.remove_image(*post_id).await?;

    Ok(HttpResponse::Ok().json(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_field_accepts_valid_text() {
        let value = utf8_field("dogs and cats".as_bytes().to_vec(), "contents").unwrap();
        assert_eq!(value, "dogs and cats");
    }

    #[test]
    fn utf8_field_rejects_invalid_bytes() {
        let err = utf8_field(vec![0x66, 0xff, 0xfe, 0x6f], "title").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn require_text_rejects_blank_values() {
        assert!(require_text(Some("  ".into()), "title").is_err());
        assert!(require_text(None, "title").is_err());
        assert_eq!(require_text(Some("T".into()), "title").unwrap(), "T");
    }
}
