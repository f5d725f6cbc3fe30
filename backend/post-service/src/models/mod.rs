/// Data models for post-service
///
/// Row types map 1:1 onto the tables in `migrations/`; view types are the
/// serialized shapes returned by the HTTP surface.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A member of the platform. Owned by the member directory; this service
/// only ever reads it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A post row. `image_url` holds at most one active blob URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub member_id: Uuid,
    pub title: String,
    pub contents: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tag row. Names are globally unique; rows are created lazily by the
/// catalog and shared across posts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

/// An uploaded image as received from the transport layer.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A post row joined with its current tag names, as returned by the eager
/// read accessor. Tag order follows `post_tags.position`.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithTags {
    pub id: Uuid,
    pub member_id: Uuid,
    pub title: String,
    pub contents: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl PostWithTags {
    pub fn into_view(self) -> PostView {
        PostView {
            post_id: self.id,
            title: self.title,
            contents: self.contents,
            image_url: self.image_url,
            tags: self.tags,
        }
    }
}

/// A post together with its current tag names, assembled from the eager
/// read accessor (never from an in-memory row whose associations may be
/// stale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub post_id: Uuid,
    pub title: String,
    pub contents: String,
    pub image_url: Option<String>,
    /// Tag names in recommendation order.
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostView>,
}
