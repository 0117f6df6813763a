use crate::config::DatabaseConfig;
use crate::database::connection::get_database_pool;
use crate::error::{AppError, Result};
use crate::models::ContactSubmission;
use sqlx::{AnyPool, Row};
use tracing::{debug, error};

pub const DATABASE_NOT_CONFIGURED: &str = "DATABASE_URL is not set on server.";

const INSERT_CONTACT: &str = r#"
    INSERT INTO contact (name, contact_number, emailid, message)
    VALUES ($1, $2, $3, $4)
    RETURNING CAST(id AS BIGINT) AS id
"#;

/// Write side of the `contact` table.
///
/// Holds no pool when the database URL is missing; every call then fails
/// with a configuration error instead of touching the network.
#[derive(Clone)]
pub struct ContactRepository {
    pool: Option<AnyPool>,
}

impl ContactRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        if !config.is_configured() {
            return Ok(Self::unconfigured());
        }
        Ok(Self::new(get_database_pool(config)?))
    }

    pub fn pool(&self) -> Option<&AnyPool> {
        self.pool.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.pool.is_some()
    }

    fn require_pool(&self) -> Result<&AnyPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::Configuration(DATABASE_NOT_CONFIGURED.to_string()))
    }

    /// Inserts one row and returns the id the store generated for it.
    pub async fn insert(&self, submission: &ContactSubmission) -> Result<i64> {
        let pool = self.require_pool()?;

        let row = sqlx::query(INSERT_CONTACT)
            .bind(submission.name.as_str())
            .bind(submission.contact_number.as_str())
            .bind(submission.email.as_str())
            .bind(submission.message.as_str())
            .fetch_one(pool)
            .await
            .map_err(|e| {
                error!("Failed to insert contact: {}", e);
                AppError::from(e)
            })?;

        let id: i64 = row.try_get("id").map_err(AppError::from)?;
        debug!(id, "Inserted contact row");

        Ok(id)
    }

    pub async fn health_check(&self) -> Result<()> {
        let pool = self.require_pool()?;

        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                AppError::from(e)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn submission(name: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            contact_number: "555-0100".to_string(),
            email: String::new(),
            message: String::new(),
        }
    }

    async fn setup_repository(temp_file: &NamedTempFile) -> ContactRepository {
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_file.path().display()),
            ..DatabaseConfig::default()
        };
        let repository = ContactRepository::from_config(&config).unwrap();

        sqlx::query(
            "CREATE TABLE contact (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                contact_number VARCHAR(100) NOT NULL,
                emailid VARCHAR(100),
                message VARCHAR(100)
            )",
        )
        .execute(repository.pool().unwrap())
        .await
        .unwrap();

        repository
    }

    #[tokio::test]
    async fn test_insert_returns_generated_ids() {
        let temp_file = NamedTempFile::new().unwrap();
        let repository = setup_repository(&temp_file).await;

        let first = repository.insert(&submission("Jane")).await.unwrap();
        let second = repository.insert(&submission("Jane")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_unconfigured_repository() {
        let repository = ContactRepository::from_config(&DatabaseConfig::default()).unwrap();
        assert!(!repository.is_configured());

        match repository.insert(&submission("Jane")).await {
            Err(AppError::Configuration(msg)) => assert_eq!(msg, DATABASE_NOT_CONFIGURED),
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert!(repository.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_file.path().display()),
            ..DatabaseConfig::default()
        };
        let repository = ContactRepository::from_config(&config).unwrap();

        let err = repository.insert(&submission("Jane")).await.unwrap_err();
        match err {
            AppError::Storage(msg) => assert!(msg.contains("contact"), "{msg}"),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let temp_file = NamedTempFile::new().unwrap();
        let repository = setup_repository(&temp_file).await;

        repository.health_check().await.unwrap();
    }
}
