use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Redirect},
    Form,
};
use serde::{Deserialize, Serialize};

use crate::app_context::{ProductEditView, ProductListing};
use crate::errors::CatalogError;
use crate::server::app::AppState;

/// Raw product form; price and category id are parsed by the catalog
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListing>, CatalogError> {
    Ok(Json(state.ctx.product_listing().await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<CreateProductForm>,
) -> Result<Redirect, CatalogError> {
    let product = state
        .ctx
        .create_product(
            form.name.as_deref(),
            form.price.as_deref(),
            form.category_id.as_deref(),
        )
        .await?;
    Ok(Redirect::to(&format!("/products/{}/edit", product.id)))
}

pub async fn edit_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductEditView>, CatalogError> {
    Ok(Json(state.ctx.product_edit_view(id).await?))
}

/// Save `attr_<id>` fields for a product
pub async fn save_product_values(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, CatalogError> {
    let fields = first_values(pairs);
    state.ctx.save_product_values(id, &fields).await?;
    Ok(Redirect::to("/products"))
}

/// Collapse submitted pairs into one value per key, keeping the first occurrence.
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut fields = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        fields.entry(key).or_insert(value);
    }
    fields
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, CatalogError> {
    state.ctx.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
