//! Overdue reporting endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{BorrowerOverdueSummary, OverdueFilter},
    AppState,
};

/// Query parameters for the overdue report
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct OverduesQuery {
    /// Loan population to inspect: active, historical or both (default)
    #[serde(default)]
    pub filter: Option<OverdueFilter>,
}

/// List borrowers with overdue or late-returned loans, worst first
#[utoipa::path(
    get,
    path = "/overdues",
    tag = "overdues",
    params(OverduesQuery),
    responses(
        (status = 200, description = "Per-borrower overdue summaries", body = Vec<BorrowerOverdueSummary>),
        (status = 502, description = "Loan source unavailable")
    )
)]
pub async fn list_overdues(
    State(state): State<AppState>,
    Query(query): Query<OverduesQuery>,
) -> AppResult<Json<Vec<BorrowerOverdueSummary>>> {
    let filter = query.filter.unwrap_or_default();
    let today = Utc::now().date_naive();

    let summaries = state
        .services
        .overdue
        .overdue_borrowers(filter, today)
        .await?;
    Ok(Json(summaries))
}
