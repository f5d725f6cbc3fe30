use crate::models::Tag;
use sqlx::PgConnection;

/// Resolve a tag by name, creating it if absent.
///
/// Safe under concurrent callers racing on the same name: the insert defers
/// to the UNIQUE constraint on `tags.name`, and a conflict means someone
/// else just created the row, so it is re-read instead of surfaced as an
/// error. At most one tag row ever exists per distinct name.
pub async fn get_or_create_tag(conn: &mut PgConnection, name: &str) -> Result<Tag, sqlx::Error> {
    let inserted = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name)
        VALUES ($1)
        ON CONFLICT (name) DO NOTHING
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(tag) = inserted {
        return Ok(tag);
    }

    // Lost the race; the row now exists.
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name
        FROM tags
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;

    Ok(tag)
}
