//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `mod.rs` - Activity catalogue operations
//! - `participants.rs` - Roster registration operations

mod participants;

pub use participants::RegistrationError;

use crate::domain::{Activity, Email, NewActivity};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::warn;

const SQL_ACTIVITY_EXISTS: &str = "SELECT 1 FROM activities WHERE name = ?";

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Check that the database answers a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // Activity operations
    // =========================================================================

    /// Whether the activities table has no rows.
    pub async fn is_empty(&self) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM activities) AS has_rows")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("has_rows") == 0)
    }

    /// Whether an activity with this name exists.
    pub async fn activity_exists(&self, name: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(SQL_ACTIVITY_EXISTS)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Insert activities in a single transaction, skipping names that already exist.
    ///
    /// Returns the number of newly inserted activities.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn insert_activities(&self, activities: &[NewActivity]) -> Result<usize, sqlx::Error> {
        if activities.is_empty() {
            return Ok(0);
        }

        let mut total_inserted = 0usize;
        let mut tx = self.pool.begin().await?;

        for activity in activities {
            let result = sqlx::query(
                r#"
                INSERT INTO activities (name, description, schedule, max_participants)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(name) DO NOTHING
                "#,
            )
            .bind(&activity.name)
            .bind(&activity.description)
            .bind(&activity.schedule)
            .bind(i64::from(activity.max_participants))
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() > 0 {
                total_inserted += 1;
            }
        }

        tx.commit().await?;
        Ok(total_inserted)
    }

    /// All activities ordered by name, each with its roster in registration order.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_all_activities(&self) -> Result<Vec<Activity>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT a.name, a.description, a.schedule, a.max_participants, p.email
            FROM activities a
            LEFT JOIN activity_participants p ON p.activity_name = a.name
            ORDER BY a.name ASC, p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut activities: Vec<Activity> = Vec::new();
        for row in rows {
            let name: String = row.get("name");
            let email: Option<String> = row.get("email");

            if activities.last().map(|a| a.name != name).unwrap_or(true) {
                let max_participants: i64 = row.get("max_participants");
                let max_participants = u32::try_from(max_participants).unwrap_or_else(|e| {
                    warn!(
                        activity = %name,
                        max_participants,
                        error = %e,
                        "Stored capacity out of range, treating as zero"
                    );
                    0
                });
                activities.push(Activity {
                    name,
                    description: row.get("description"),
                    schedule: row.get("schedule"),
                    max_participants,
                    participants: Vec::new(),
                });
            }

            if let (Some(activity), Some(email)) = (activities.last_mut(), email) {
                activity.participants.push(Email::from_stored(email));
            }
        }

        Ok(activities)
    }
}
