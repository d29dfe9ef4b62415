use crate::domain::model::HoroscopeResult;
use crate::domain::ports::HoroscopeStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS horoscopes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    birthday TEXT NOT NULL,
    photo_url TEXT,
    occupation TEXT NOT NULL,
    zodiac_sign TEXT NOT NULL,
    horoscope TEXT NOT NULL,
    created_at TEXT NOT NULL,
    saved BOOLEAN NOT NULL DEFAULT 0
)
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, first_name, birthday, photo_url, occupation, zodiac_sign, horoscope, created_at, saved FROM horoscopes";

#[derive(Debug, sqlx::FromRow)]
struct HoroscopeRow {
    id: i64,
    first_name: String,
    birthday: String,
    photo_url: Option<String>,
    occupation: String,
    zodiac_sign: String,
    horoscope: String,
    created_at: DateTime<Utc>,
    saved: bool,
}

impl From<HoroscopeRow> for HoroscopeResult {
    fn from(row: HoroscopeRow) -> Self {
        Self {
            id: Some(row.id),
            first_name: row.first_name,
            birthday: row.birthday,
            photo_url: row.photo_url.unwrap_or_default(),
            occupation: row.occupation,
            zodiac_sign: row.zodiac_sign,
            horoscope: row.horoscope,
            created_at: Some(row.created_at),
            saved: row.saved,
        }
    }
}

/// SQLite-backed store. The table is created on connect if missing.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // in-memory 資料庫每條連線各自獨立，只能用一條
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        tracing::info!("Connected to horoscope database at {}", url);
        Ok(store)
    }

    async fn initialize(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl HoroscopeStore for SqliteStore {
    async fn save(&self, result: &HoroscopeResult) -> Result<i64> {
        let outcome = sqlx::query(
            "INSERT INTO horoscopes (first_name, birthday, photo_url, occupation, zodiac_sign, horoscope, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&result.first_name)
        .bind(&result.birthday)
        .bind(&result.photo_url)
        .bind(&result.occupation)
        .bind(&result.zodiac_sign)
        .bind(&result.horoscope)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(outcome.last_insert_rowid())
    }

    async fn mark_liked(&self, id: i64) -> Result<bool> {
        let outcome = sqlx::query("UPDATE horoscopes SET saved = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(outcome.rows_affected() > 0)
    }

    async fn get_all(&self) -> Result<Vec<HoroscopeResult>> {
        let rows: Vec<HoroscopeRow> = sqlx::query_as(&format!(
            "{} WHERE saved = 1 ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HoroscopeResult::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<HoroscopeResult>> {
        let row: Option<HoroscopeRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(HoroscopeResult::from))
    }
}
