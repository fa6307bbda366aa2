use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::database::entities::{categories, product_attribute_values, products};
use crate::errors::{CatalogError, CatalogResult};
use crate::services::ValidationService;

#[derive(Clone)]
pub struct ProductService {
    db: DatabaseConnection,
}

impl ProductService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a product without attribute values; those are attached separately.
    pub async fn create_product(
        &self,
        category_id: i32,
        name: Option<&str>,
        price: f64,
    ) -> CatalogResult<products::Model> {
        let txn = self.db.begin().await?;

        if categories::Entity::find_by_id(category_id)
            .one(&txn)
            .await?
            .is_none()
        {
            txn.rollback().await?;
            return Err(CatalogError::not_found("Category", category_id));
        }

        let name = match ValidationService::validate_name(name, "Product name") {
            Ok(name) => name,
            Err(err) => {
                txn.rollback().await?;
                return Err(err.into());
            }
        };

        let product = products::ActiveModel {
            category_id: Set(category_id),
            name: Set(name),
            price: Set(price),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Created product '{}' (id {}) in category {}",
            product.name, product.id, category_id
        );
        Ok(product)
    }

    /// All products, newest first
    pub async fn list_products(&self) -> CatalogResult<Vec<products::Model>> {
        let products = products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .order_by_desc(products::Column::Id)
            .all(&self.db)
            .await?;

        Ok(products)
    }

    pub async fn latest_products(&self, limit: u64) -> CatalogResult<Vec<products::Model>> {
        let products = products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .order_by_desc(products::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(products)
    }

    pub async fn get_product(&self, product_id: i32) -> CatalogResult<products::Model> {
        products::Entity::find_by_id(product_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", product_id))
    }

    /// Delete a product and its stored attribute values
    pub async fn delete_product(&self, product_id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        if products::Entity::find_by_id(product_id)
            .one(&txn)
            .await?
            .is_none()
        {
            txn.rollback().await?;
            return Err(CatalogError::not_found("Product", product_id));
        }

        product_attribute_values::Entity::delete_many()
            .filter(product_attribute_values::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;

        products::Entity::delete_by_id(product_id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted product {}", product_id);
        Ok(())
    }
}
