use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::database::entities::{attributes, categories, product_attribute_values, products};
use crate::errors::{CatalogError, CatalogResult};
use crate::services::ValidationService;

#[derive(Clone)]
pub struct CategoryService {
    db: DatabaseConnection,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a category with a unique, non-blank name
    pub async fn create_category(&self, name: Option<&str>) -> CatalogResult<categories::Model> {
        let name = ValidationService::validate_name(name, "Category name")?;
        let conflict_message = format!("Category '{}' already exists", name);

        let txn = self.db.begin().await?;

        let existing = categories::Entity::find()
            .filter(categories::Column::Name.eq(name.as_str()))
            .one(&txn)
            .await?;

        if existing.is_some() {
            txn.rollback().await?;
            return Err(CatalogError::conflict(conflict_message));
        }

        let category = categories::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CatalogError::from_db_conflict(e, conflict_message.clone()))?;

        txn.commit()
            .await
            .map_err(|e| CatalogError::from_db_conflict(e, conflict_message))?;

        info!("Created category '{}' (id {})", category.name, category.id);
        Ok(category)
    }

    /// All categories ordered by name
    pub async fn list_categories(&self) -> CatalogResult<Vec<categories::Model>> {
        let categories = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;

        Ok(categories)
    }

    pub async fn get_category(&self, category_id: i32) -> CatalogResult<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::not_found("Category", category_id))
    }

    /// Delete a category along with everything that hangs off it.
    ///
    /// Children are removed explicitly inside one transaction.
    pub async fn delete_category(&self, category_id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        if categories::Entity::find_by_id(category_id)
            .one(&txn)
            .await?
            .is_none()
        {
            txn.rollback().await?;
            return Err(CatalogError::not_found("Category", category_id));
        }

        let product_ids: Vec<i32> = products::Entity::find()
            .filter(products::Column::CategoryId.eq(category_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|product| product.id)
            .collect();

        let attribute_ids: Vec<i32> = attributes::Entity::find()
            .filter(attributes::Column::CategoryId.eq(category_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|attribute| attribute.id)
            .collect();

        let values = product_attribute_values::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(product_attribute_values::Column::ProductId.is_in(product_ids.clone()))
                    .add(product_attribute_values::Column::AttributeId.is_in(attribute_ids)),
            )
            .exec(&txn)
            .await?;

        products::Entity::delete_many()
            .filter(products::Column::CategoryId.eq(category_id))
            .exec(&txn)
            .await?;

        attributes::Entity::delete_many()
            .filter(attributes::Column::CategoryId.eq(category_id))
            .exec(&txn)
            .await?;

        categories::Entity::delete_by_id(category_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            "Deleted category {} with {} products and {} stored values",
            category_id,
            product_ids.len(),
            values.rows_affected
        );
        Ok(())
    }
}
