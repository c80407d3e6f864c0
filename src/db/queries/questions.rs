use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A question as served by the API: the displayed rating is the mean of the
/// question's rating values, `None` when nothing has been rated yet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub difficulty: i64,
    pub rating: Option<f64>,
}

/// Flat row used for CSV import/export; ratings are not round-tripped.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub difficulty: i64,
}

const SELECT_WITH_RATING: &str = r#"
SELECT q.id, q.question, q.answer, q.category_id, q.difficulty, AVG(r.value) AS rating
FROM questions q
LEFT JOIN ratings r ON r.question_id = q.id
"#;

pub async fn get_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_WITH_RATING} GROUP BY q.id ORDER BY q.id"
    ))
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_WITH_RATING} WHERE q.category_id = ?1 GROUP BY q.id ORDER BY q.id"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match on the question text.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_WITH_RATING} WHERE q.question LIKE '%' || ?1 || '%' GROUP BY q.id ORDER BY q.id"
    ))
    .bind(term)
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_WITH_RATING} WHERE q.id = ?1 GROUP BY q.id"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category_id: i64,
    difficulty: i64,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category_id, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category_id)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_question(pool: &SqlitePool, question: &QuestionRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        UPDATE questions SET question=?1, answer=?2, category_id=?3, difficulty=?4 WHERE questions.id = ?5
        "#,
    )
    .bind(question.question.as_str())
    .bind(question.answer.as_str())
    .bind(question.category_id)
    .bind(question.difficulty)
    .bind(question.id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Deletes a question and its ratings in one transaction. Fails with
/// `RowNotFound` when the question does not exist.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_question(pool, id).await?.ok_or(sqlx::Error::RowNotFound)?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        DELETE FROM ratings WHERE question_id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query(
        r#"
        DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}

pub async fn import_questions(
    pool: &SqlitePool,
    questions: Vec<QuestionRecord>,
) -> sqlx::Result<()> {
    use std::collections::HashSet;

    let existing: HashSet<i64> = get_questions(pool).await?.iter().map(|q| q.id).collect();
    let imported: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    for id in existing.difference(&imported) {
        delete_question(pool, *id).await?;
    }
    for question in questions {
        if existing.contains(&question.id) {
            update_question(pool, &question).await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO questions (id, question, answer, category_id, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(question.id)
            .bind(question.question.as_str())
            .bind(question.answer.as_str())
            .bind(question.category_id)
            .bind(question.difficulty)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}
