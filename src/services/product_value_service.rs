use std::collections::{BTreeMap, HashMap};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::attribute_types::{attribute_field_key, normalize_boolean, AttributeType};
use crate::database::entities::{attributes, product_attribute_values, products};
use crate::errors::{CatalogError, CatalogResult, ValidationError};

/// A validated value waiting to be written for one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct PendingValue {
    pub attribute_id: i32,
    pub value: String,
}

/// Stores attribute values per product with upsert semantics.
#[derive(Clone)]
pub struct ProductValueService {
    db: DatabaseConnection,
}

impl ProductValueService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve and validate the submitted value for every attribute of a category.
    ///
    /// Values are looked up under `attr_<attribute id>`. Non-boolean attributes
    /// without a submitted value are skipped. Boolean attributes always produce a
    /// value, since an unchecked checkbox is simply absent from the form.
    pub fn collect_pending_values(
        attributes: &[attributes::Model],
        fields: &HashMap<String, String>,
    ) -> Result<Vec<PendingValue>, ValidationError> {
        let mut pending = Vec::with_capacity(attributes.len());

        for attribute in attributes {
            let kind = attribute.attribute_type()?;
            let submitted = fields
                .get(&attribute_field_key(attribute.id))
                .map(String::as_str);

            let raw = match (kind, submitted) {
                (AttributeType::Boolean, submitted) => normalize_boolean(submitted).to_string(),
                (_, Some(value)) => value.to_string(),
                (_, None) => {
                    debug!(
                        "No value submitted for attribute {} ('{}'), leaving it untouched",
                        attribute.id, attribute.name
                    );
                    continue;
                }
            };

            kind.validate(&raw)?;
            pending.push(PendingValue {
                attribute_id: attribute.id,
                value: raw,
            });
        }

        Ok(pending)
    }

    /// Validate and store the submitted attribute values of a product.
    ///
    /// All values are written in one transaction. If any value fails validation
    /// nothing from this call is written.
    pub async fn save_values(
        &self,
        product_id: i32,
        fields: &HashMap<String, String>,
    ) -> CatalogResult<Vec<product_attribute_values::Model>> {
        let txn = self.db.begin().await?;

        let product = match products::Entity::find_by_id(product_id).one(&txn).await? {
            Some(product) => product,
            None => {
                txn.rollback().await?;
                return Err(CatalogError::not_found("Product", product_id));
            }
        };

        let attributes = attributes::Entity::find()
            .filter(attributes::Column::CategoryId.eq(product.category_id))
            .order_by_asc(attributes::Column::Id)
            .all(&txn)
            .await?;

        let pending = match Self::collect_pending_values(&attributes, fields) {
            Ok(pending) => pending,
            Err(err) => {
                txn.rollback().await?;
                debug!("Rejected values for product {}: {}", product_id, err);
                return Err(err.into());
            }
        };

        let mut saved = Vec::with_capacity(pending.len());
        for PendingValue {
            attribute_id,
            value,
        } in pending
        {
            let existing = product_attribute_values::Entity::find()
                .filter(product_attribute_values::Column::ProductId.eq(product_id))
                .filter(product_attribute_values::Column::AttributeId.eq(attribute_id))
                .one(&txn)
                .await?;

            let row = match existing {
                Some(row) => {
                    let mut active: product_attribute_values::ActiveModel = row.into();
                    active.value = Set(value);
                    active.update(&txn).await?
                }
                None => {
                    product_attribute_values::ActiveModel {
                        product_id: Set(product_id),
                        attribute_id: Set(attribute_id),
                        value: Set(value),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?
                }
            };
            saved.push(row);
        }

        txn.commit().await?;

        info!("Saved {} attribute values for product {}", saved.len(), product_id);
        Ok(saved)
    }

    /// Stored values of a product keyed by attribute id
    pub async fn values_for_product(&self, product_id: i32) -> CatalogResult<BTreeMap<i32, String>> {
        let rows = product_attribute_values::Entity::find()
            .filter(product_attribute_values::Column::ProductId.eq(product_id))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.attribute_id, row.value))
            .collect())
    }
}
