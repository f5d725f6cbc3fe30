/// Post orchestration - sequences member lookup, blob storage, tag
/// recommendation and relational bookkeeping for every post operation.
///
/// Metadata writes (post row, tag rows, link rows) for one operation land in
/// a single transaction. Blob store calls sit outside that boundary: the
/// external store cannot roll back, so the ordering rules below minimize the
/// damage when one side fails after the other took effect. Creation of new
/// state always precedes destruction of old state.
use sqlx::{PgConnection, PgPool};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{member_repo, post_repo, post_tag_repo, tag_repo};
use crate::error::{AppError, Result};
use crate::models::{ImageUpload, PostView, PostWithTags};
use crate::services::recommender::TagRecommender;
use crate::services::storage::BlobStore;

/// Namespace under which post images are stored.
const POST_IMAGE_DIR: &str = "post-images";

pub struct PostService {
    pool: PgPool,
    blob_store: Arc<dyn BlobStore>,
    recommender: Arc<dyn TagRecommender>,
}

impl PostService {
    pub fn new(
        pool: PgPool,
        blob_store: Arc<dyn BlobStore>,
        recommender: Arc<dyn TagRecommender>,
    ) -> Self {
        Self {
            pool,
            blob_store,
            recommender,
        }
    }

    /// Create a post for a member, upload its image if one was supplied, and
    /// register the recommended tags.
    ///
    /// The upload happens before any persistence: a failed upload leaves no
    /// partial post behind. The recommendation call and the tag writes share
    /// the metadata transaction, so a recommendation failure rolls the post
    /// row back as well.
    pub async fn create_post(
        &self,
        member_id: Uuid,
        title: &str,
        contents: &str,
        image: Option<ImageUpload>,
    ) -> Result<PostView> {
        member_repo::find_member_by_id(&self.pool, member_id)
            .await?
            .ok_or(AppError::MemberNotFound(member_id))?;

        let image_url = match image.filter(|i| !i.is_empty()) {
            Some(img) => Some(self.blob_store.upload(&img, POST_IMAGE_DIR).await?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let post =
            post_repo::insert_post(&mut tx, member_id, title, contents, image_url.as_deref())
                .await?;

        let tag_names = self.recommender.recommend(contents).await?;
        register_tags(&mut tx, &tag_names, post.id).await?;

        tx.commit().await?;

        tracing::info!(post_id = %post.id, %member_id, tag_count = tag_names.len(), "post created");

        self.post_view(post.id).await
    }

    /// List all posts owned by a member, each with its currently attached
    /// tag names.
    pub async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<PostView>> {
        member_repo::find_member_by_id(&self.pool, member_id)
            .await?
            .ok_or(AppError::MemberNotFound(member_id))?;

        let posts = post_repo::find_posts_by_member(&self.pool, member_id).await?;

        Ok(posts.into_iter().map(PostWithTags::into_view).collect())
    }

    /// Update a post's title, contents and (optionally) image, then re-run
    /// recommendation against the new contents and replace the full tag set.
    ///
    /// When a new image is supplied it is uploaded first; the old image is
    /// only deleted after the new upload succeeded and the metadata
    /// committed. A failed new upload therefore never destroys the
    /// still-valid old image. A failed old-image delete surfaces as
    /// `DeleteFailure` with the metadata already committed: the caller must
    /// treat that as "update succeeded, cleanup pending", and the stale blob
    /// stays orphaned in storage.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        title: &str,
        contents: &str,
        image: Option<ImageUpload>,
    ) -> Result<PostView> {
        let post = post_repo::find_post_with_tags(&self.pool, post_id)
            .await?
            .ok_or(AppError::PostNotFound(post_id))?;

        let old_image_url = post.image_url;

        let new_image_url = match image.filter(|i| !i.is_empty()) {
            Some(img) => Some(self.blob_store.upload(&img, POST_IMAGE_DIR).await?),
            None => None,
        };

        let effective_url = new_image_url.clone().or_else(|| old_image_url.clone());

        let mut tx = self.pool.begin().await?;

        post_repo::update_post(&mut tx, post_id, title, contents, effective_url.as_deref())
            .await?;

        // Full replacement of the link set: bulk delete before re-insert, so
        // the persisted links never mix old and new recommendations.
        post_tag_repo::delete_links_for_post(&mut tx, post_id).await?;

        let tag_names = self.recommender.recommend(contents).await?;
        register_tags(&mut tx, &tag_names, post_id).await?;

        tx.commit().await?;

        if new_image_url.is_some() {
            if let Some(old_url) = old_image_url.as_deref() {
                if let Err(e) = self.blob_store.delete(old_url).await {
                    tracing::warn!(%post_id, "old image cleanup failed after update: {}", e);
                    return Err(e);
                }
            }
        }

        tracing::info!(%post_id, tag_count = tag_names.len(), "post updated");

        self.post_view(post_id).await
    }

    /// Delete a post and its image.
    ///
    /// The blob goes first: if the blob delete fails, the operation aborts
    /// and the post row stays, so the persisted image URL never dangles
    /// toward a blob that was half-removed.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or(AppError::PostNotFound(post_id))?;

        if let Some(url) = post.image_url.as_deref() {
            self.blob_store.delete(url).await?;
        }

        let mut conn = self.pool.acquire().await?;
        post_repo::delete_post(&mut conn, post.id).await?;

        tracing::info!(%post_id, "post deleted");

        Ok(())
    }

    /// Remove only the image from a post.
    ///
    /// The caller explicitly asked to remove something that must exist, so a
    /// post without an image fails with `ImageNotFound` and no blob call is
    /// made.
    pub async fn remove_image(&self, post_id: Uuid) -> Result<PostView> {
        let post = post_repo::find_post_with_tags(&self.pool, post_id)
            .await?
            .ok_or(AppError::PostNotFound(post_id))?;

        let url = post
            .image_url
            .filter(|u| !u.is_empty())
            .ok_or(AppError::ImageNotFound)?;

        self.blob_store.delete(&url).await?;

        let mut conn = self.pool.acquire().await?;
        post_repo::clear_post_image(&mut conn, post.id).await?;

        tracing::info!(%post_id, "post image removed");

        self.post_view(post.id).await
    }

    /// Assemble the returned view from persisted state through the eager
    /// accessor; the rows mutated above do not carry the fresh tag set.
    async fn post_view(&self, post_id: Uuid) -> Result<PostView> {
        let post = post_repo::find_post_with_tags(&self.pool, post_id)
            .await?
            .ok_or(AppError::PostNotFound(post_id))?;

        Ok(post.into_view())
    }
}

/// Resolve-or-create each recommended tag and link it to the post, in
/// recommendation order, skipping duplicate names within the same run. An
/// empty recommendation list is a valid outcome: the post ends up with zero
/// tags.
async fn register_tags(
    conn: &mut PgConnection,
    tag_names: &[String],
    post_id: Uuid,
) -> Result<()> {
    for (position, name) in dedup_preserving_order(tag_names).into_iter().enumerate() {
        let tag = tag_repo::get_or_create_tag(conn, name).await?;
        post_tag_repo::insert_link(conn, post_id, tag.id, position as i32).await?;
    }

    Ok(())
}

/// Drop repeated names, keeping first occurrences in order. The recommender
/// makes no uniqueness guarantee.
fn dedup_preserving_order(names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let names = vec![
            "animals".to_string(),
            "pets".to_string(),
            "animals".to_string(),
            "dogs".to_string(),
            "pets".to_string(),
        ];
        assert_eq!(
            dedup_preserving_order(&names),
            vec!["animals", "pets", "dogs"]
        );
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let names = vec!["Fiction".to_string(), "fiction".to_string()];
        assert_eq!(dedup_preserving_order(&names), vec!["Fiction", "fiction"]);
    }

    #[test]
    fn dedup_of_empty_list_is_empty() {
        assert!(dedup_preserving_order(&[]).is_empty());
    }
}
