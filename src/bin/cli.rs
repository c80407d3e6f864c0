use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::PathBuf;

use trivia_api::config::get_settings;
use trivia_api::db;
use trivia_api::db::queries::questions::QuestionRecord;
use trivia_api::db::queries::{categories, questions};
use trivia_api::db::Category;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the starter trivia set into an empty database
    Seed,
    /// Import categories and questions from csv files
    Import { path: PathBuf },
    /// Export categories and questions to csv files
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let settings = get_settings()?;
    let pool = db::establish_connection(&settings.database.path).await?;
    db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Seed => seed(&pool).await?,
        Commands::Export { path } => export_data(&pool, path).await?,
        Commands::Import { path } => import_data(&pool, path).await?,
    }
    Ok(())
}

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> anyhow::Result<Vec<T>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record?;
        out.push(record);
    }
    Ok(out)
}

async fn export_data(pool: &SqlitePool, path: PathBuf) -> anyhow::Result<()> {
    let cats = categories::get_categories(pool).await?;
    let records: Vec<QuestionRecord> = questions::get_questions(pool)
        .await?
        .into_iter()
        .map(|q| QuestionRecord {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category_id: q.category_id,
            difficulty: q.difficulty,
        })
        .collect();
    if !path.exists() {
        std::fs::create_dir_all(&path)?
    }
    write_to(path.join("categories.csv"), cats)?;
    write_to(path.join("questions.csv"), records)?;
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: PathBuf) -> anyhow::Result<()> {
    let cats: Vec<Category> = read_from(path.join("categories.csv"))?;
    let records: Vec<QuestionRecord> = read_from(path.join("questions.csv"))?;
    categories::import_categories(pool, cats).await?;
    questions::import_questions(pool, records).await?;
    Ok(())
}

const SEED_CATEGORIES: [&str; 7] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
    "Misc",
];

// (question, answer, 1-based seed category, difficulty)
const SEED_QUESTIONS: [(&str, &str, usize, i64); 12] = [
    (
        "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        "Apollo 13",
        5,
        4,
    ),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    (
        "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
        "Maya Angelou",
        4,
        2,
    ),
    (
        "Hematology is a branch of medicine involving the study of what?",
        "Blood",
        1,
        4,
    ),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    (
        "How many paintings did Van Gogh sell in his lifetime?",
        "One",
        2,
        4,
    ),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    (
        "The Taj Mahal is located in which Indian city?",
        "Agra",
        3,
        2,
    ),
    (
        "What is the largest lake in Africa?",
        "Lake Victoria",
        3,
        2,
    ),
    (
        "Which country won the first ever soccer World Cup in 1930?",
        "Uruguay",
        6,
        4,
    ),
    (
        "Which is the only team to play in every soccer World Cup tournament?",
        "Brazil",
        6,
        3,
    ),
    (
        "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?",
        "Edward Scissorhands",
        5,
        3,
    ),
];

async fn seed(pool: &SqlitePool) -> anyhow::Result<()> {
    if !categories::get_categories(pool).await?.is_empty() {
        anyhow::bail!("database is not empty, refusing to seed");
    }
    let mut ids = Vec::with_capacity(SEED_CATEGORIES.len());
    for name in SEED_CATEGORIES {
        ids.push(categories::create_category(pool, name).await?);
    }
    for (question, answer, category, difficulty) in SEED_QUESTIONS {
        questions::create_question(pool, question, answer, ids[category - 1], difficulty).await?;
    }
    tracing::info!(
        "Seeded {} categories and {} questions",
        SEED_CATEGORIES.len(),
        SEED_QUESTIONS.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_helpers_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");
        let cats = vec![
            Category {
                id: 1,
                name: "Science".to_owned(),
            },
            Category {
                id: 2,
                name: "Art".to_owned(),
            },
        ];
        write_to(path.clone(), cats).unwrap();
        let back: Vec<Category> = read_from(path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].name, "Art");
    }
}
