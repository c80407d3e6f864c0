use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    pub id: i64,
    pub question_id: i64,
    pub user_id: i64,
    pub value: i64,
}

pub async fn rate_question(
    pool: &SqlitePool,
    question_id: i64,
    user_id: i64,
    value: i64,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO ratings (question_id, user_id, value) VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(question_id)
    .bind(user_id)
    .bind(value)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn get_ratings_for_question(
    pool: &SqlitePool,
    question_id: i64,
) -> sqlx::Result<Vec<Rating>> {
    sqlx::query_as::<_, Rating>(
        r#"
        SELECT id, question_id, user_id, value FROM ratings WHERE ratings.question_id = ?1 ORDER BY id
        "#,
    )
    .bind(question_id)
    .fetch_all(pool)
    .await
}
