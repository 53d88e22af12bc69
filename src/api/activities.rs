use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

use crate::api::AppState;
use crate::domain::{Activity, Email};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityDto {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<Email>,
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        Self {
            description: activity.description,
            schedule: activity.schedule,
            max_participants: activity.max_participants,
            participants: activity.participants,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Every activity keyed by name, with its roster.
pub async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, ActivityDto>>, AppError> {
    let activities = state.repo.get_all_activities().await?;

    Ok(Json(
        activities
            .into_iter()
            .map(|a| (a.name.clone(), ActivityDto::from(a)))
            .collect(),
    ))
}

pub async fn signup(
    Path(activity): Path<String>,
    Query(params): Query<EmailQuery>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = parse_email(&params)?;

    state
        .repo
        .add_participant(&activity, &email)
        .await
        .map_err(|e| {
            warn!(activity = %activity, email = %email, reason = %e, "Signup rejected");
            AppError::from(e)
        })?;

    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", email, activity),
    }))
}

pub async fn unregister(
    Path(activity): Path<String>,
    Query(params): Query<EmailQuery>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = parse_email(&params)?;

    state
        .repo
        .remove_participant(&activity, &email)
        .await
        .map_err(|e| {
            warn!(activity = %activity, email = %email, reason = %e, "Unregister rejected");
            AppError::from(e)
        })?;

    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", email, activity),
    }))
}

/// A missing `email` parameter is treated like an empty one.
fn parse_email(params: &EmailQuery) -> Result<Email, AppError> {
    Ok(Email::from_str(params.email.as_deref().unwrap_or(""))?)
}
