use crate::models::Member;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a member by ID
pub async fn find_member_by_id(
    pool: &PgPool,
    member_id: Uuid,
) -> Result<Option<Member>, sqlx::Error> {
    let member = sqlx::query_as::<_, Member>(
        r#"
        SELECT id, name, email, created_at
        FROM members
        WHERE id = $1
        "#,
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await?;

    Ok(member)
}
