use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, InMemoryCredentialStore};
use crate::errors::Result;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::use_cases::{CategoryUseCases, ProductUseCases, ProfileUpdate, UserUseCases};
use flowmart_core::{Acknowledgement, Category, Outcome, Product, Session, UserAccount};
use log::debug;
use std::sync::Arc;

/// Main SDK entry point for FlowMart.
///
/// Built once from a [`ClientConfig`]; changing the base URL or timeouts
/// means building a new instance. Safe to share between tasks.
#[derive(Debug, Clone)]
pub struct FlowMart {
    client: ApiClient,
}

impl FlowMart {
    /// Reqwest transport with an in-memory credential store.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_credentials(config, Arc::new(InMemoryCredentialStore::new()))
    }

    /// Reqwest transport with a caller-supplied credential store.
    pub fn with_credentials(
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.timeouts)?;
        Self::with_transport(config, Arc::new(transport), credentials)
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        debug!("Creating FlowMart SDK");
        debug!("  Timeouts: {:?}", config.timeouts);

        let client = ApiClient::new(&config.base_url, transport, credentials, config.environment)?;

        if let Some(token) = config.initial_token.as_deref().filter(|t| !t.is_empty()) {
            debug!("Seeding credential store with the configured token");
            client.credentials().set(token);
        }

        Ok(Self { client })
    }

    /// Configuration from `FLOWMART_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The store holding the bearer token.
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(self.client.credentials())
    }

    pub fn current_token(&self) -> Option<String> {
        self.client.credentials().get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_token().is_some_and(|t| !t.is_empty())
    }

    /// Forget the stored token. Nothing is sent to the server.
    pub fn logout(&self) {
        debug!("Clearing stored credential");
        self.client.credentials().clear();
    }

    // Categories

    pub async fn list_categories(&self) -> Outcome<Vec<Category>> {
        CategoryUseCases::new(&self.client).list().await
    }

    pub async fn create_category(&self, name: &str) -> Outcome<Category> {
        CategoryUseCases::new(&self.client).create(name).await
    }

    pub async fn update_category(&self, id: i64, name: &str) -> Outcome<Category> {
        CategoryUseCases::new(&self.client).update(id, name).await
    }

    pub async fn delete_category(&self, id: i64) -> Outcome<Acknowledgement> {
        CategoryUseCases::new(&self.client).delete(id).await
    }

    // Products

    pub async fn list_products(&self) -> Outcome<Vec<Product>> {
        ProductUseCases::new(&self.client).list().await
    }

    pub async fn list_products_by_category(&self, category_id: i64) -> Outcome<Vec<Product>> {
        ProductUseCases::new(&self.client)
            .list_by_category(category_id)
            .await
    }

    pub async fn create_product(
        &self,
        category_id: i64,
        name: &str,
        quantity: &str,
    ) -> Outcome<Product> {
        ProductUseCases::new(&self.client)
            .create(category_id, name, quantity)
            .await
    }

    pub async fn update_product(
        &self,
        id: i64,
        category_id: i64,
        name: &str,
        quantity: &str,
    ) -> Outcome<Product> {
        ProductUseCases::new(&self.client)
            .update(id, category_id, name, quantity)
            .await
    }

    pub async fn delete_product(&self, id: i64) -> Outcome<Acknowledgement> {
        ProductUseCases::new(&self.client).delete(id).await
    }

    // Account

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Outcome<UserAccount> {
        UserUseCases::new(&self.client)
            .register(name, email, phone, password)
            .await
    }

    /// On success the returned token becomes the stored credential.
    pub async fn login(&self, email: &str, password: &str) -> Outcome<Session> {
        UserUseCases::new(&self.client).login(email, password).await
    }

    pub async fn fetch_profile(&self) -> Outcome<UserAccount> {
        UserUseCases::new(&self.client).fetch_profile().await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Outcome<UserAccount> {
        UserUseCases::new(&self.client).update_profile(update).await
    }

    /// Does not log out; call [`FlowMart::logout`] afterwards if needed.
    pub async fn delete_account(&self) -> Outcome<Acknowledgement> {
        UserUseCases::new(&self.client).delete_account().await
    }
}
