use sea_orm::*;
use tracing::{debug, info};

use crate::attribute_types::AttributeType;
use crate::database::entities::{attributes, categories};
use crate::errors::CatalogResult;

const MARKER_CATEGORY: &str = "Dresses";

const DEMO_CATALOG: [(&str, &[(&str, AttributeType)]); 2] = [
    (
        "Dresses",
        &[("Size", AttributeType::Text), ("Color", AttributeType::Text)],
    ),
    (
        "Shoes",
        &[("Size", AttributeType::Number), ("Material", AttributeType::Text)],
    ),
];

/// Insert the demo categories and attributes unless the catalog was already seeded.
///
/// Returns `true` when data was created. The presence of a "Dresses" category is
/// taken as proof of an earlier seed.
pub async fn create_demo_catalog(db: &DatabaseConnection) -> CatalogResult<bool> {
    let txn = db.begin().await?;

    let existing = categories::Entity::find()
        .filter(categories::Column::Name.eq(MARKER_CATEGORY))
        .one(&txn)
        .await?;

    if existing.is_some() {
        debug!("Demo catalog already present, skipping seed");
        txn.rollback().await?;
        return Ok(false);
    }

    for (category_name, attribute_defs) in DEMO_CATALOG {
        let category = categories::ActiveModel {
            name: Set(category_name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let attribute_models = attribute_defs
            .iter()
            .map(|(name, data_type)| attributes::ActiveModel {
                category_id: Set(category.id),
                name: Set(name.to_string()),
                data_type: Set(data_type.as_str().to_string()),
                ..Default::default()
            })
            .collect::<Vec<_>>();

        attributes::Entity::insert_many(attribute_models)
            .exec(&txn)
            .await?;

        info!(
            "Seeded category '{}' (id {}) with {} attributes",
            category_name,
            category.id,
            attribute_defs.len()
        );
    }

    txn.commit().await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_seed_creates_demo_catalog() {
        let db = setup_test_db().await;

        assert!(create_demo_catalog(&db).await.unwrap());

        let names: Vec<String> = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Dresses".to_string(), "Shoes".to_string()]);

        let shoe_size = attributes::Entity::find()
            .inner_join(categories::Entity)
            .filter(categories::Column::Name.eq("Shoes"))
            .filter(attributes::Column::Name.eq("Size"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shoe_size.data_type, "number");
        assert_eq!(attributes::Entity::find().count(&db).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seed_twice_is_a_noop() {
        let db = setup_test_db().await;

        assert!(create_demo_catalog(&db).await.unwrap());
        assert!(!create_demo_catalog(&db).await.unwrap());

        assert_eq!(categories::Entity::find().count(&db).await.unwrap(), 2);
        assert_eq!(attributes::Entity::find().count(&db).await.unwrap(), 4);
    }
}
