use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::attribute_types::AttributeType;
use crate::errors::ValidationError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub data_type: String, // one of AttributeType::as_str()
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "Cascade"
    )]
    Categories,
    #[sea_orm(has_many = "super::product_attribute_values::Entity")]
    ProductAttributeValues,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::product_attribute_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductAttributeValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Declared type of this attribute
    pub fn attribute_type(&self) -> Result<AttributeType, ValidationError> {
        self.data_type.parse()
    }
}
