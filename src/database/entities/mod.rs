pub mod attributes;
pub mod categories;
pub mod product_attribute_values;
pub mod products;
