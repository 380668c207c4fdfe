// tests/common/mod.rs

#![allow(dead_code)]

use sqlx::AnyPool;
use trivia_api::{
    config::Config,
    db::{self, Backend},
    routes,
    state::AppState,
};

pub const SCIENCE: i64 = 1;
pub const ART: i64 = 2;
pub const GEOGRAPHY: i64 = 3;
pub const HISTORY: i64 = 4;
pub const ENTERTAINMENT: i64 = 5;
pub const SPORTS: i64 = 6;

/// (question, answer, category, difficulty)
const SEED_QUESTIONS: &[(&str, &str, i64, i64)] = &[
    ("What is the heaviest organ in the human body?", "The Liver", SCIENCE, 4),
    ("Who discovered penicillin?", "Alexander Fleming", SCIENCE, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", SCIENCE, 4),
    ("Escher was a creator of optical illusions. What were his initials?", "M C", ART, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", ART, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", ART, 4),
    ("Which American artist was a pioneer of Abstract Expressionism?", "Jackson Pollock", ART, 2),
    ("What is the largest lake in Africa?", "Lake Victoria", GEOGRAPHY, 2),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", GEOGRAPHY, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", GEOGRAPHY, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", HISTORY, 1),
    ("Who invented Peanut Butter?", "George Washington Carver", HISTORY, 2),
    ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", ENTERTAINMENT, 4),
    ("What was the title of the 1990 fantasy directed by Tim Burton?", "Edward Scissorhands", ENTERTAINMENT, 3),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", SPORTS, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", SPORTS, 4),
];

pub const SEEDED_COUNT: i64 = SEED_QUESTIONS.len() as i64;

pub struct TestApp {
    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub address: String,
    pub pool: AnyPool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Ids of the seeded questions of one category, in insertion order.
    pub async fn question_ids_in(&self, category: i64) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE category = $1 ORDER BY id")
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .unwrap()
    }

    pub async fn question_exists(&self, id: i64) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap()
            .is_some()
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        host: [127, 0, 0, 1].into(),
        port: 0,
        questions_per_page: 10,
        cors_allowed_origins: Vec::new(),
        log_dir: "logs".to_string(),
    }
}

async fn seed_questions(pool: &AnyPool) {
    for (question, answer, category, difficulty) in SEED_QUESTIONS {
        sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4)",
        )
        .bind(*question)
        .bind(*answer)
        .bind(*category)
        .bind(*difficulty)
        .execute(pool)
        .await
        .expect("Failed to seed questions");
    }
}

/// Spawns the app on a random port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(), true).await
}

/// Spawns the app without any question rows.
pub async fn spawn_empty_app() -> TestApp {
    spawn_app_with(test_config(), false).await
}

pub async fn spawn_app_with(config: Config, seed: bool) -> TestApp {
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open in-memory database");

    db::migrate(&pool, Backend::Sqlite)
        .await
        .expect("Failed to migrate database");

    if seed {
        seed_questions(&pool).await;
    }

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
    }
}
