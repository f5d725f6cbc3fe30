use crate::models::{Post, PostWithTags};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Create a new post row
pub async fn insert_post(
    conn: &mut PgConnection,
    member_id: Uuid,
    title: &str,
    contents: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (member_id, title, contents, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, member_id, title, contents, image_url, created_at, updated_at
        "#,
    )
    .bind(member_id)
    .bind(title)
    .bind(contents)
    .bind(image_url)
    .fetch_one(conn)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, member_id, title, contents, image_url, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID together with its tag names, eagerly joined.
///
/// This is the one read every orchestrator operation returns its result
/// through: after the association writes, a plain row read does not carry
/// the tag set, so views are always assembled from this accessor.
pub async fn find_post_with_tags(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostWithTags>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostWithTags>(
        r#"
        SELECT p.id, p.member_id, p.title, p.contents, p.image_url,
               p.created_at, p.updated_at,
               COALESCE(
                   array_agg(t.name ORDER BY pt.position)
                       FILTER (WHERE t.name IS NOT NULL),
                   '{}'
               ) AS tags
        FROM posts p
        LEFT JOIN post_tags pt ON pt.post_id = p.id
        LEFT JOIN tags t ON t.id = pt.tag_id
        WHERE p.id = $1
        GROUP BY p.id
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find all posts by a member, each with its tag names.
/// Returns posts in descending order by creation date.
pub async fn find_posts_by_member(
    pool: &PgPool,
    member_id: Uuid,
) -> Result<Vec<PostWithTags>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithTags>(
        r#"
        SELECT p.id, p.member_id, p.title, p.contents, p.image_url,
               p.created_at, p.updated_at,
               COALESCE(
                   array_agg(t.name ORDER BY pt.position)
                       FILTER (WHERE t.name IS NOT NULL),
                   '{}'
               ) AS tags
        FROM posts p
        LEFT JOIN post_tags pt ON pt.post_id = p.id
        LEFT JOIN tags t ON t.id = pt.tag_id
        WHERE p.member_id = $1
        GROUP BY p.id
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Update a post's title, contents and image URL
pub async fn update_post(
    conn: &mut PgConnection,
    post_id: Uuid,
    title: &str,
    contents: &str,
    image_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET title = $1, contents = $2, image_url = $3, updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(title)
    .bind(contents)
    .bind(image_url)
    .bind(post_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Clear a post's image URL
pub async fn clear_post_image(conn: &mut PgConnection, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET image_url = NULL, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Delete a post row; association links cascade.
pub async fn delete_post(conn: &mut PgConnection, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
