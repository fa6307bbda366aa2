use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::database::entities::{attributes, categories, products};
use crate::services::{AttributeService, CategoryService, ProductService, ProductValueService};

mod catalog_operations;

/// Number of products shown on the dashboard
pub const LATEST_PRODUCTS_LIMIT: u64 = 5;

/// Shared application context exposing the catalog services to the HTTP and CLI layers.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
    category_service: Arc<CategoryService>,
    attribute_service: Arc<AttributeService>,
    product_service: Arc<ProductService>,
    product_value_service: Arc<ProductValueService>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection) -> Self {
        let category_service = Arc::new(CategoryService::new(db.clone()));
        let attribute_service = Arc::new(AttributeService::new(db.clone()));
        let product_service = Arc::new(ProductService::new(db.clone()));
        let product_value_service = Arc::new(ProductValueService::new(db.clone()));

        Self {
            db,
            category_service,
            attribute_service,
            product_service,
            product_value_service,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub categories: u64,
    pub products: u64,
    pub attributes: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub counts: CatalogCounts,
    pub latest: Vec<products::Model>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: categories::Model,
    pub attributes: Vec<attributes::Model>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductListing {
    pub products: Vec<products::Model>,
    pub categories: Vec<categories::Model>,
}

/// Everything needed to edit the attribute values of one product
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductEditView {
    pub product: products::Model,
    pub attributes: Vec<attributes::Model>,
    pub existing: BTreeMap<i32, String>,
}
