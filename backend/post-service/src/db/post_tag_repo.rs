use sqlx::PgConnection;
use uuid::Uuid;

/// Link a tag to a post at the given position.
/// Position preserves the recommendation order within the post's tag set.
pub async fn insert_link(
    conn: &mut PgConnection,
    post_id: Uuid,
    tag_id: Uuid,
    position: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO post_tags (post_id, tag_id, position)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(post_id)
    .bind(tag_id)
    .bind(position)
    .execute(conn)
    .await?;

    Ok(())
}

/// Remove every tag link for a post. On re-tagging this bulk delete always
/// precedes the bulk re-insert.
pub async fn delete_links_for_post(
    conn: &mut PgConnection,
    post_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM post_tags
        WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
