use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::attribute_types::AttributeType;
use crate::database::entities::{attributes, categories};
use crate::errors::{CatalogError, CatalogResult};
use crate::services::ValidationService;

/// Per-category attribute schema.
///
/// Attributes are only ever added; names may repeat within a category.
#[derive(Clone)]
pub struct AttributeService {
    db: DatabaseConnection,
}

impl AttributeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a typed attribute to a category.
    ///
    /// The type name defaults to `text` and is case-folded before it is checked.
    pub async fn add_attribute(
        &self,
        category_id: i32,
        name: Option<&str>,
        data_type: Option<&str>,
    ) -> CatalogResult<attributes::Model> {
        let txn = self.db.begin().await?;

        if categories::Entity::find_by_id(category_id)
            .one(&txn)
            .await?
            .is_none()
        {
            txn.rollback().await?;
            return Err(CatalogError::not_found("Category", category_id));
        }

        let validated = AttributeType::from_submitted(data_type).and_then(|kind| {
            ValidationService::validate_name(name, "Attribute name").map(|name| (name, kind))
        });
        let (name, kind) = match validated {
            Ok(validated) => validated,
            Err(err) => {
                txn.rollback().await?;
                return Err(err.into());
            }
        };

        let attribute = attributes::ActiveModel {
            category_id: Set(category_id),
            name: Set(name),
            data_type: Set(kind.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Added attribute '{}' ({}) to category {}",
            attribute.name, attribute.data_type, category_id
        );
        Ok(attribute)
    }

    /// Attributes of a category in storage order
    pub async fn list_attributes(&self, category_id: i32) -> CatalogResult<Vec<attributes::Model>> {
        let attributes = attributes::Entity::find()
            .filter(attributes::Column::CategoryId.eq(category_id))
            .order_by_asc(attributes::Column::Id)
            .all(&self.db)
            .await?;

        Ok(attributes)
    }
}
