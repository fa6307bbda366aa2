use std::collections::HashMap;

use sea_orm::{EntityTrait, PaginatorTrait};

use super::{
    AppContext, CatalogCounts, CategoryDetail, DashboardSummary, ProductEditView, ProductListing,
    LATEST_PRODUCTS_LIMIT,
};
use crate::database::entities::{attributes, categories, product_attribute_values, products};
use crate::database::seed_data;
use crate::errors::CatalogResult;
use crate::services::ValidationService;

impl AppContext {
    // ----- Dashboard -------------------------------------------------------
    pub async fn dashboard(&self) -> CatalogResult<DashboardSummary> {
        let counts = CatalogCounts {
            categories: categories::Entity::find().count(&self.db).await?,
            products: products::Entity::find().count(&self.db).await?,
            attributes: attributes::Entity::find().count(&self.db).await?,
        };
        let latest = self
            .product_service
            .latest_products(LATEST_PRODUCTS_LIMIT)
            .await?;

        Ok(DashboardSummary { counts, latest })
    }

    // ----- Categories and attributes ----------------------------------------
    pub async fn create_category(&self, name: Option<&str>) -> CatalogResult<categories::Model> {
        self.category_service.create_category(name).await
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<categories::Model>> {
        self.category_service.list_categories().await
    }

    pub async fn category_detail(&self, category_id: i32) -> CatalogResult<CategoryDetail> {
        let category = self.category_service.get_category(category_id).await?;
        let attributes = self.attribute_service.list_attributes(category_id).await?;

        Ok(CategoryDetail {
            category,
            attributes,
        })
    }

    pub async fn delete_category(&self, category_id: i32) -> CatalogResult<()> {
        self.category_service.delete_category(category_id).await
    }

    pub async fn add_attribute(
        &self,
        category_id: i32,
        name: Option<&str>,
        data_type: Option<&str>,
    ) -> CatalogResult<attributes::Model> {
        self.attribute_service
            .add_attribute(category_id, name, data_type)
            .await
    }

    // ----- Products ----------------------------------------------------------
    pub async fn product_listing(&self) -> CatalogResult<ProductListing> {
        let products = self.product_service.list_products().await?;
        let categories = self.category_service.list_categories().await?;

        Ok(ProductListing {
            products,
            categories,
        })
    }

    /// Create a product from raw form input.
    ///
    /// The price and category id arrive as text; the category is checked before
    /// the product name.
    pub async fn create_product(
        &self,
        name: Option<&str>,
        price: Option<&str>,
        category_id: Option<&str>,
    ) -> CatalogResult<products::Model> {
        let price = ValidationService::parse_price(price)?;
        let category_id = ValidationService::parse_category_id(category_id)?;

        self.product_service
            .create_product(category_id, name, price)
            .await
    }

    pub async fn product_edit_view(&self, product_id: i32) -> CatalogResult<ProductEditView> {
        let product = self.product_service.get_product(product_id).await?;
        let attributes = self
            .attribute_service
            .list_attributes(product.category_id)
            .await?;
        let existing = self
            .product_value_service
            .values_for_product(product_id)
            .await?;

        Ok(ProductEditView {
            product,
            attributes,
            existing,
        })
    }

    pub async fn save_product_values(
        &self,
        product_id: i32,
        fields: &HashMap<String, String>,
    ) -> CatalogResult<Vec<product_attribute_values::Model>> {
        self.product_value_service
            .save_values(product_id, fields)
            .await
    }

    pub async fn delete_product(&self, product_id: i32) -> CatalogResult<()> {
        self.product_service.delete_product(product_id).await
    }

    // ----- Seed ----------------------------------------------------------------
    pub async fn seed_demo_data(&self) -> CatalogResult<bool> {
        seed_data::create_demo_catalog(&self.db).await
    }
}
