pub mod attribute_service;
pub mod category_service;
pub mod product_service;
pub mod product_value_service;
pub mod validation;

pub use attribute_service::*;
pub use category_service::*;
pub use product_service::*;
pub use product_value_service::*;
pub use validation::*;
