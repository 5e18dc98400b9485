use crate::errors::Result;
use crate::model::Reading;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Opens the database, creating the file and the readings table on first use.
pub async fn make_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening database...");
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    info!("Database ready");

    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS readings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            temperature REAL NOT NULL,
            humidity REAL NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends one reading and returns the sequence id the store assigned to it.
/// The insert is a single statement: it either lands whole or not at all.
pub async fn insert_reading(
    pool: &SqlitePool,
    timestamp: DateTime<Utc>,
    temperature: f64,
    humidity: f64,
) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO readings (timestamp, temperature, humidity) VALUES (?, ?, ?)")
            .bind(timestamp)
            .bind(temperature)
            .bind(humidity)
            .execute(pool)
            .await?;

    Ok(result.last_insert_rowid())
}

/// The most recently appended reading, if any.
pub async fn latest_reading(pool: &SqlitePool) -> Result<Option<Reading>> {
    let reading = sqlx::query_as::<_, Reading>(
        "SELECT timestamp, temperature, humidity FROM readings ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(reading)
}

/// Up to `limit` readings, newest first.
pub async fn recent_readings(pool: &SqlitePool, limit: i64) -> Result<Vec<Reading>> {
    let readings = sqlx::query_as::<_, Reading>(
        "SELECT timestamp, temperature, humidity FROM readings ORDER BY id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps the in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_insert_then_latest_round_trip() {
        tokio_test::block_on(async {
            let pool = test_pool().await;
            let before = Utc::now();

            insert_reading(&pool, Utc::now(), 21.5, 48.0).await.unwrap();

            let reading = latest_reading(&pool).await.unwrap().unwrap();
            assert_eq!(reading.temperature, 21.5);
            assert_eq!(reading.humidity, 48.0);
            assert!(reading.timestamp >= before);
        });
    }

    #[test]
    fn test_latest_on_empty_store() {
        tokio_test::block_on(async {
            let pool = test_pool().await;

            assert!(latest_reading(&pool).await.unwrap().is_none());
        });
    }

    #[test]
    fn test_sequence_ids_strictly_increase() {
        tokio_test::block_on(async {
            let pool = test_pool().await;

            let mut last = 0;
            for i in 0..5 {
                let id = insert_reading(&pool, Utc::now(), 20.0 + i as f64, 50.0)
                    .await
                    .unwrap();
                assert!(id > last);
                last = id;
            }
        });
    }

    #[test]
    fn test_sequence_ids_unique_under_concurrent_inserts() {
        tokio_test::block_on(async {
            let pool = test_pool().await;

            let mut handles = Vec::new();
            for i in 0..10 {
                let pool = pool.clone();
                handles.push(tokio::spawn(async move {
                    insert_reading(&pool, Utc::now(), i as f64, 50.0)
                        .await
                        .unwrap()
                }));
            }

            let mut ids = Vec::new();
            for handle in handles {
                ids.push(handle.await.unwrap());
            }
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 10);
        });
    }

    #[test]
    fn test_recent_is_newest_first_and_bounded() {
        tokio_test::block_on(async {
            let pool = test_pool().await;

            for i in 0..10 {
                insert_reading(&pool, Utc::now(), i as f64, 50.0).await.unwrap();
            }

            let readings = recent_readings(&pool, 3).await.unwrap();
            let temperatures: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
            assert_eq!(temperatures, vec![9.0, 8.0, 7.0]);
        });
    }

    #[test]
    fn test_duplicate_submissions_create_duplicate_rows() {
        tokio_test::block_on(async {
            let pool = test_pool().await;

            insert_reading(&pool, Utc::now(), 21.5, 48.0).await.unwrap();
            insert_reading(&pool, Utc::now(), 21.5, 48.0).await.unwrap();

            let readings = recent_readings(&pool, 10).await.unwrap();
            assert_eq!(readings.len(), 2);
        });
    }
}
