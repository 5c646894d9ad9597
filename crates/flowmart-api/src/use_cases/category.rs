use super::guard;
use crate::client::{form, ApiClient};
use crate::transport::HttpMethod;
use flowmart_core::validators::validate_name;
use flowmart_core::{Acknowledgement, Category, Outcome};
use log::{debug, info};

pub struct CategoryUseCases<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoryUseCases<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Outcome<Vec<Category>> {
        debug!("Fetching categories");
        let categories: Vec<Category> = self
            .client
            .fetch(HttpMethod::Get, "categories", None, Some("categories"))
            .await?;
        info!("Fetched {} categories", categories.len());
        Ok(categories)
    }

    pub async fn create(&self, name: &str) -> Outcome<Category> {
        debug!("Creating category '{}'", name);
        guard("create category", validate_name(name))?;

        let category: Category = self
            .client
            .fetch(
                HttpMethod::Post,
                "categories",
                Some(form([("name", name)])),
                Some("category"),
            )
            .await?;
        info!("Created category {} ({})", category.id, category.name);
        Ok(category)
    }

    pub async fn update(&self, id: i64, name: &str) -> Outcome<Category> {
        debug!("Updating category {} to '{}'", id, name);
        guard("update category", validate_name(name))?;

        let category: Category = self
            .client
            .fetch(
                HttpMethod::Put,
                &format!("categories/{}", id),
                Some(form([("name", name)])),
                Some("category"),
            )
            .await?;
        info!("Updated category {}", category.id);
        Ok(category)
    }

    pub async fn delete(&self, id: i64) -> Outcome<Acknowledgement> {
        debug!("Deleting category {}", id);
        let ack = self
            .client
            .acknowledge(HttpMethod::Delete, &format!("categories/{}", id), None)
            .await?;
        info!("Deleted category {}", id);
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::credentials::InMemoryCredentialStore;
    use crate::testing::FakeTransport;
    use flowmart_core::errors::UNKNOWN_ERROR_MESSAGE;
    use flowmart_core::{ErrorKind, FlowMartError};
    use std::sync::Arc;

    fn client(transport: &Arc<FakeTransport>) -> ApiClient {
        ApiClient::new(
            "https://flowmart.banit.co.ke/",
            transport.clone(),
            Arc::new(InMemoryCredentialStore::with_token("tok-categories")),
            Environment::Production,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_blank_name_never_reaches_transport() {
        let transport = Arc::new(FakeTransport::new());
        let client = client(&transport);

        for name in ["", "   "] {
            let err = CategoryUseCases::new(&client).create(name).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.message(), "Name cannot be blank");
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_blank_name_never_reaches_transport() {
        let transport = Arc::new(FakeTransport::new());
        let client = client(&transport);

        let err = CategoryUseCases::new(&client).update(4, "\t").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Name cannot be blank");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_sends_form_and_decodes_category() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(200, r#"{"status":"ok","data":{"id":1,"name":"Electronics"}}"#);
        let client = client(&transport);

        let category = CategoryUseCases::new(&client).create("Electronics").await.unwrap();
        assert_eq!(category, Category::new(1, "Electronics"));

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://flowmart.banit.co.ke/categories");
        assert_eq!(request.form_value("name"), Some("Electronics"));
        assert_eq!(request.header("Authorization"), Some("Bearer tok-categories"));
    }

    #[tokio::test]
    async fn test_list_unwraps_categories_key() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(
            200,
            r#"{"status":"success","data":{"categories":[{"id":1,"name":"Electronics","created_at":"2024-10-28T09:15:00Z"},{"id":2,"name":"Groceries"}]}}"#,
        );
        let client = client(&transport);

        let categories = CategoryUseCases::new(&client).list().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert!(categories[0].created_at_utc().is_some());
        assert_eq!(transport.last_request().method, HttpMethod::Get);
        assert_eq!(transport.last_request().form, None);
    }

    #[tokio::test]
    async fn test_update_and_delete_paths() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(
            200,
            r#"{"message":"Category updated","status":"success","data":{"category":{"id":4,"name":"Phones"}}}"#,
        );
        transport.push_json(200, r#"{"status":"success","message":"Category deleted"}"#);
        let client = client(&transport);
        let categories = CategoryUseCases::new(&client);

        let updated = categories.update(4, "Phones").await.unwrap();
        assert_eq!(updated.name, "Phones");

        let ack = categories.delete(4).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Category deleted"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].url, "https://flowmart.banit.co.ke/categories/4");
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].url, "https://flowmart.banit.co.ke/categories/4");
    }

    #[tokio::test]
    async fn test_not_found_with_unparsable_body() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_json(404, "<h1>Not Found</h1>");
        let client = client(&transport);

        let err = CategoryUseCases::new(&client).delete(99).await.unwrap_err();
        match err {
            FlowMartError::Api(api) => {
                assert_eq!(api.status_code, 404);
                assert_eq!(api.message, UNKNOWN_ERROR_MESSAGE);
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }
}
