use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub score: i64,
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password, score FROM users WHERE users.email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// `password` must already be a salted hash; the score starts at 0.
pub async fn create_user(pool: &SqlitePool, email: &str, password: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO users (email, password) VALUES (?1, ?2)
        "#,
    )
    .bind(email)
    .bind(password)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}
