use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Normalizes a category name before storage and lookup: every letter that
/// follows a non-letter is uppercased, the rest are lowercased. Name
/// uniqueness is case-insensitive as a consequence.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

pub async fn get_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, name
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_category_by_name(pool: &SqlitePool, name: &str) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name FROM categories WHERE categories.name = ?1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO categories (name) VALUES (?1)
        "#,
    )
    .bind(name)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_category(pool: &SqlitePool, category: &Category) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE categories SET name=?1 WHERE categories.id = ?2
        "#,
    )
    .bind(category.name.as_str())
    .bind(category.id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Deletes a category together with its questions and their ratings in one
/// transaction. Fails with `RowNotFound` when the category does not exist.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_category(pool, id).await?.ok_or(sqlx::Error::RowNotFound)?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        DELETE FROM ratings WHERE question_id IN (SELECT id FROM questions WHERE category_id = ?1)
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query(
        r#"
        DELETE FROM questions WHERE category_id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query(
        r#"
        DELETE FROM categories WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    use std::collections::HashSet;

    let existing: HashSet<i64> = get_categories(pool).await?.iter().map(|c| c.id).collect();
    let imported: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    for id in existing.difference(&imported) {
        delete_category(pool, *id).await?;
    }
    for category in categories {
        if existing.contains(&category.id) {
            update_category(pool, &category).await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO categories (id, name) VALUES (?1, ?2)
                "#,
            )
            .bind(category.id)
            .bind(category.name.as_str())
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}
