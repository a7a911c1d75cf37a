//! Sanction management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{sanction::ApplySanction, Sanction},
    AppState,
};

/// Sanction with its countdown, as rendered to administrators
#[derive(Serialize, ToSchema)]
pub struct SanctionDetails {
    pub user_id: i32,
    pub reason: String,
    pub applied_by: i32,
    pub created_at: DateTime<Utc>,
    /// Expiration date; null for "until return" sanctions
    pub expires_at: Option<DateTime<Utc>>,
    /// Whole days until expiration; null for "until return" sanctions
    pub days_remaining: Option<i64>,
}

impl SanctionDetails {
    fn from_sanction(sanction: Sanction, now: DateTime<Utc>) -> Self {
        Self {
            days_remaining: sanction.days_remaining(now),
            user_id: sanction.user_id,
            reason: sanction.reason,
            applied_by: sanction.applied_by,
            created_at: sanction.created_at,
            expires_at: sanction.expires_at,
        }
    }
}

/// List sanctions currently in force
#[utoipa::path(
    get,
    path = "/sanctions",
    tag = "sanctions",
    responses(
        (status = 200, description = "Active sanctions", body = Vec<SanctionDetails>)
    )
)]
pub async fn list_sanctions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SanctionDetails>>> {
    let now = Utc::now();
    let active = state.services.sanctions.active(now).await?;

    let details = active
        .into_iter()
        .map(|sanction| SanctionDetails::from_sanction(sanction, now))
        .collect();
    Ok(Json(details))
}

/// Apply a sanction to a borrower
#[utoipa::path(
    post,
    path = "/sanctions",
    tag = "sanctions",
    request_body = ApplySanction,
    responses(
        (status = 201, description = "Sanction applied", body = Sanction),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Sanction store failure")
    )
)]
pub async fn apply_sanction(
    State(state): State<AppState>,
    Json(request): Json<ApplySanction>,
) -> AppResult<(StatusCode, Json<Sanction>)> {
    let sanction = state.services.sanctions.apply(request, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(sanction)))
}

/// Lift a borrower's sanction
#[utoipa::path(
    delete,
    path = "/sanctions/{user_id}",
    tag = "sanctions",
    params(
        ("user_id" = i32, Path, description = "Borrower ID")
    ),
    responses(
        (status = 204, description = "Sanction removed (or none existed)")
    )
)]
pub async fn remove_sanction(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.sanctions.remove(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove every sanction (administrative bulk reset)
#[utoipa::path(
    delete,
    path = "/sanctions",
    tag = "sanctions",
    responses(
        (status = 204, description = "All sanctions removed")
    )
)]
pub async fn clear_sanctions(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.services.sanctions.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
