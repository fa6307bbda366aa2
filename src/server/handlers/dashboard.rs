use axum::{extract::State, response::Json, response::Redirect};

use crate::app_context::DashboardSummary;
use crate::errors::CatalogError;
use crate::server::app::AppState;

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, CatalogError> {
    Ok(Json(state.ctx.dashboard().await?))
}

/// Seed the demo catalog if it is missing, then go back to the dashboard
pub async fn seed(State(state): State<AppState>) -> Result<Redirect, CatalogError> {
    state.ctx.seed_demo_data().await?;
    Ok(Redirect::to("/"))
}
