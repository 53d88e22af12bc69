//! Roster registration operations for the repository.

use crate::domain::Email;
use sqlx::sqlite::SqliteConnection;
use thiserror::Error;
use tracing::info;

use super::{Repository, SQL_ACTIVITY_EXISTS};

const SQL_IS_REGISTERED: &str =
    "SELECT 1 FROM activity_participants WHERE activity_name = ? AND email = ?";

/// Reasons a roster change is refused.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadyRegistered,
    #[error("Activity is full")]
    ActivityFull,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Repository {
    /// Whether `email` is on the roster of `activity`.
    pub async fn is_registered(&self, activity: &str, email: &Email) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(SQL_IS_REGISTERED)
            .bind(activity)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Register `email` for `activity`.
    ///
    /// The capacity check and the insert are one statement inside one write
    /// transaction, so concurrent signups cannot overbook. When nothing is
    /// inserted the cause is reported in validation order: unknown activity,
    /// duplicate registration, full roster.
    ///
    /// # Errors
    /// Returns a `RegistrationError` describing why the signup was refused.
    pub async fn add_participant(
        &self,
        activity: &str,
        email: &Email,
    ) -> Result<(), RegistrationError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO activity_participants (activity_name, email)
            SELECT a.name, ?
            FROM activities a
            WHERE a.name = ?
              AND (SELECT COUNT(*) FROM activity_participants p WHERE p.activity_name = a.name)
                  < a.max_participants
            "#,
        )
        .bind(email.as_str())
        .bind(activity)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => {
                tx.commit().await?;
                info!(activity, email = %email, "Participant registered");
                Ok(())
            }
            Ok(_) => Err(diagnose_signup(&mut *tx, activity, email).await),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RegistrationError::AlreadyRegistered)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove `email` from the roster of `activity`.
    ///
    /// # Errors
    /// Returns `ActivityNotFound` or `NotRegistered` when there is nothing to remove.
    pub async fn remove_participant(
        &self,
        activity: &str,
        email: &Email,
    ) -> Result<(), RegistrationError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM activity_participants WHERE activity_name = ? AND email = ?",
        )
        .bind(activity)
        .bind(email.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return if exists(&mut *tx, SQL_ACTIVITY_EXISTS, &[activity]).await? {
                Err(RegistrationError::NotRegistered)
            } else {
                Err(RegistrationError::ActivityNotFound)
            };
        }

        tx.commit().await?;
        info!(activity, email = %email, "Participant unregistered");
        Ok(())
    }
}

/// Work out why the guarded insert touched no rows.
async fn diagnose_signup(
    conn: &mut SqliteConnection,
    activity: &str,
    email: &Email,
) -> RegistrationError {
    match exists(conn, SQL_ACTIVITY_EXISTS, &[activity]).await {
        Ok(false) => return RegistrationError::ActivityNotFound,
        Ok(true) => {}
        Err(e) => return e.into(),
    }
    match exists(conn, SQL_IS_REGISTERED, &[activity, email.as_str()]).await {
        Ok(true) => RegistrationError::AlreadyRegistered,
        Ok(false) => RegistrationError::ActivityFull,
        Err(e) => e.into(),
    }
}

async fn exists(
    conn: &mut SqliteConnection,
    sql: &str,
    binds: &[&str],
) -> Result<bool, sqlx::Error> {
    let mut query = sqlx::query(sql);
    for value in binds {
        query = query.bind(*value);
    }
    Ok(query.fetch_optional(&mut *conn).await?.is_some())
}
