use super::guard;
use crate::client::{form, ApiClient, FormFields};
use crate::transport::HttpMethod;
use flowmart_core::validators::validate_name;
use flowmart_core::{Acknowledgement, Outcome, Product};
use log::{debug, info};

pub struct ProductUseCases<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductUseCases<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Outcome<Vec<Product>> {
        debug!("Fetching products");
        let products: Vec<Product> = self
            .client
            .fetch(HttpMethod::Get, "products", None, Some("products"))
            .await?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    pub async fn list_by_category(&self, category_id: i64) -> Outcome<Vec<Product>> {
        debug!("Fetching products in category {}", category_id);
        let products: Vec<Product> = self
            .client
            .fetch(
                HttpMethod::Get,
                &format!("categories/{}/products", category_id),
                None,
                Some("products"),
            )
            .await?;
        info!(
            "Fetched {} products in category {}",
            products.len(),
            category_id
        );
        Ok(products)
    }

    pub async fn create(&self, category_id: i64, name: &str, quantity: &str) -> Outcome<Product> {
        debug!("Creating product '{}' in category {}", name, category_id);
        guard("create product", validate_name(name))?;

        let product: Product = self
            .client
            .fetch(
                HttpMethod::Post,
                "products",
                Some(product_form(category_id, name, quantity)),
                Some("product"),
            )
            .await?;
        info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub async fn update(
        &self,
        id: i64,
        category_id: i64,
        name: &str,
        quantity: &str,
    ) -> Outcome<Product> {
        debug!("Updating product {}", id);
        guard("update product", validate_name(name))?;

        let product: Product = self
            .client
            .fetch(
                HttpMethod::Put,
                &format!("products/{}", id),
                Some(product_form(category_id, name, quantity)),
                Some("product"),
            )
            .await?;
        info!("Updated product {}", product.id);
        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> Outcome<Acknowledgement> {
        debug!("Deleting product {}", id);
        let ack = self
            .client
            .acknowledge(HttpMethod::Delete, &format!("products/{}", id), None)
            .await?;
        info!("Deleted product {}", id);
        Ok(ack)
    }
}

fn product_form(category_id: i64, name: &str, quantity: &str) -> FormFields {
    form([
        ("category_id", category_id.to_string()),
        ("name", name.to_string()),
        ("quantity", quantity.to_string()),
    ])
}
