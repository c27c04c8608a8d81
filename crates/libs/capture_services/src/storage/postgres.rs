use crate::storage::{PhotoStore, StoreError, StoredPhoto};
use crate::utils::nice_id;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common_types::{LocationSample, NewPhotoRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use tracing::info;

/// Get a database connection pool.
///
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
pub async fn get_db_pool(database_url: &str) -> color_eyre::Result<PgPool> {
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;
    Ok(pool)
}

#[derive(Debug, FromRow)]
struct PhotoRow {
    id: String,
    image_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy: Option<f64>,
    location_timestamp: Option<i64>,
    uploaded_at: DateTime<Utc>,
    file_name: Option<String>,
}

impl From<PhotoRow> for StoredPhoto {
    fn from(row: PhotoRow) -> Self {
        let location = match (row.latitude, row.longitude, row.location_timestamp) {
            (Some(latitude), Some(longitude), Some(timestamp)) => Some(LocationSample {
                latitude,
                longitude,
                accuracy: row.accuracy,
                timestamp,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            image_url: row.image_url,
            location,
            uploaded_at: row.uploaded_at,
            file_name: row.file_name,
        }
    }
}

/// Photo collection backed by a Postgres table.
///
/// `uploaded_at` is assigned server-side (`DEFAULT now()`), so global feed
/// ordering never depends on device clocks.
pub struct PgPhotoStore {
    pool: PgPool,
    collection: String,
}

impl PgPhotoStore {
    #[must_use]
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
        }
    }

    /// Creates the collection table when it does not exist yet.
    ///
    /// Columns besides `id` and `uploaded_at` stay nullable: documents
    /// written by older clients may lack them, and the read side filters
    /// instead of failing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r"
            CREATE TABLE IF NOT EXISTS {} (
                id                 TEXT PRIMARY KEY,
                image_url          TEXT,
                latitude           DOUBLE PRECISION,
                longitude          DOUBLE PRECISION,
                accuracy           DOUBLE PRECISION,
                location_timestamp BIGINT,
                uploaded_at        TIMESTAMPTZ NOT NULL DEFAULT now(),
                file_name          TEXT
            )
            ",
            self.collection
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn append(&self, record: NewPhotoRecord) -> Result<String, StoreError> {
        let id = nice_id(20);
        let sql = format!(
            r"
            INSERT INTO {}
                (id, image_url, latitude, longitude, accuracy, location_timestamp, file_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
            self.collection
        );
        sqlx::query(&sql)
            .bind(&id)
            .bind(&record.image_url)
            .bind(record.location.latitude)
            .bind(record.location.longitude)
            .bind(record.location.accuracy)
            .bind(record.location.timestamp)
            .bind(&record.file_name)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_by_uploaded_desc(&self) -> Result<Vec<StoredPhoto>, StoreError> {
        let sql = format!(
            r"
            SELECT id, image_url, latitude, longitude, accuracy,
                   location_timestamp, uploaded_at, file_name
            FROM {}
            ORDER BY uploaded_at DESC
            ",
            self.collection
        );
        let rows = sqlx::query_as::<_, PhotoRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(StoredPhoto::from).collect())
    }
}
