use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Redirect},
    Form,
};
use serde::{Deserialize, Serialize};

use crate::app_context::CategoryDetail;
use crate::database::entities::categories;
use crate::errors::CatalogError;
use crate::server::app::AppState;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateCategoryForm {
    pub name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AddAttributeForm {
    pub name: Option<String>,
    pub data_type: Option<String>,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<categories::Model>>, CatalogError> {
    Ok(Json(state.ctx.list_categories().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    Form(form): Form<CreateCategoryForm>,
) -> Result<Redirect, CatalogError> {
    state.ctx.create_category(form.name.as_deref()).await?;
    Ok(Redirect::to("/categories"))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryDetail>, CatalogError> {
    Ok(Json(state.ctx.category_detail(id).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, CatalogError> {
    state.ctx.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_attribute(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<AddAttributeForm>,
) -> Result<Redirect, CatalogError> {
    state
        .ctx
        .add_attribute(id, form.name.as_deref(), form.data_type.as_deref())
        .await?;
    Ok(Redirect::to(&format!("/categories/{}", id)))
}
