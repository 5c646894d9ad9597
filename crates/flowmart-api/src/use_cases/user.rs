use super::guard;
use crate::client::{form, ApiClient, FormFields};
use crate::credentials::CredentialStore;
use crate::transport::HttpMethod;
use flowmart_core::validators::{
    validate_email, validate_login_password, validate_name, validate_new_password,
    validate_phone,
};
use flowmart_core::{Acknowledgement, Outcome, OutcomeExt, Session, UserAccount};
use log::{debug, info};

/// Fields to change on the current account. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.password.is_none()
    }

    fn validate(&self) -> Outcome<()> {
        if let Some(name) = &self.name {
            guard("update profile", validate_name(name))?;
        }
        if let Some(email) = &self.email {
            guard("update profile", validate_email(email))?;
        }
        if let Some(phone) = &self.phone {
            guard("update profile", validate_phone(phone))?;
        }
        if let Some(password) = &self.password {
            guard("update profile", validate_new_password(password))?;
        }
        Ok(())
    }

    fn to_form(&self) -> FormFields {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("password", &self.password),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| (field.to_string(), v.clone())))
        .collect()
    }
}

pub struct UserUseCases<'a> {
    client: &'a ApiClient,
}

impl<'a> UserUseCases<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Outcome<UserAccount> {
        debug!("Registering account for {}", email);
        guard("register", validate_name(name))?;
        guard("register", validate_email(email))?;
        guard("register", validate_phone(phone))?;
        guard("register", validate_new_password(password))?;

        let user: UserAccount = self
            .client
            .fetch(
                HttpMethod::Post,
                "register",
                Some(form([
                    ("name", name),
                    ("email", email),
                    ("phone", phone),
                    ("password", password),
                ])),
                Some("user"),
            )
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Log in and publish the returned token to the credential store.
    pub async fn login(&self, email: &str, password: &str) -> Outcome<Session> {
        debug!("Logging in as {}", email);
        guard("login", validate_email(email))?;
        guard("login", validate_login_password(password))?;

        let credentials = self.client.credentials();
        self.client
            .fetch::<Session>(
                HttpMethod::Post,
                "login",
                Some(form([("email", email), ("password", password)])),
                None,
            )
            .await
            .on_success(|session| {
                credentials.set(&session.api_key);
                info!("Logged in as user {}", session.user.id);
            })
    }

    pub async fn fetch_profile(&self) -> Outcome<UserAccount> {
        debug!("Fetching profile");
        let user: UserAccount = self
            .client
            .fetch(HttpMethod::Get, "user", None, Some("user"))
            .await?;
        info!("Fetched profile of user {}", user.id);
        Ok(user)
    }

    /// Validates only the provided fields and sends only those. An empty
    /// update is still sent.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Outcome<UserAccount> {
        debug!("Updating profile");
        update.validate()?;

        let user: UserAccount = self
            .client
            .fetch(HttpMethod::Put, "user", Some(update.to_form()), Some("user"))
            .await?;
        info!("Updated profile of user {}", user.id);
        Ok(user)
    }

    /// Deletes the account. The stored credential is left in place.
    pub async fn delete_account(&self) -> Outcome<Acknowledgement> {
        debug!("Deleting account");
        let ack = self
            .client
            .acknowledge(HttpMethod::Delete, "user", None)
            .await?;
        info!("Account deleted");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::credentials::InMemoryCredentialStore;
    use crate::testing::FakeTransport;
    use flowmart_core::validators::{
        EMAIL_INVALID_MESSAGE, PASSWORD_BLANK_MESSAGE, PASSWORD_WEAK_MESSAGE, PHONE_INVALID_MESSAGE,
    };
    use flowmart_core::ErrorKind;
    use std::sync::Arc;

    const USER_JSON: &str =
        r#"{"id":3,"name":"Jane","email":"jane@flowmart.co.ke","phone":"+254712345678"}"#;

    fn setup() -> (Arc<FakeTransport>, InMemoryCredentialStore, ApiClient) {
        let transport = Arc::new(FakeTransport::new());
        let store = InMemoryCredentialStore::new();
        let client = ApiClient::new(
            "https://flowmart.banit.co.ke/",
            transport.clone(),
            Arc::new(store.clone()),
            Environment::Production,
        )
        .unwrap();
        (transport, store, client)
    }

    #[tokio::test]
    async fn test_register_validates_every_field_in_order() {
        let (transport, _, client) = setup();
        let users = UserUseCases::new(&client);

        let cases = [
            (("", "a@b.co", "+12345678901", "Passw0rd@"), "Name cannot be blank"),
            (("Jane", "jane", "+12345678901", "Passw0rd@"), EMAIL_INVALID_MESSAGE),
            (("Jane", "a@b.co", "12345", "Passw0rd@"), PHONE_INVALID_MESSAGE),
            (("Jane", "a@b.co", "+12345678901", "password"), PASSWORD_WEAK_MESSAGE),
        ];
        for ((name, email, phone, password), expected) in cases {
            let err = users.register(name, email, phone, password).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.message(), expected);
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_sends_form() {
        let (transport, _, client) = setup();
        transport.push_json(
            200,
            &format!(r#"{{"message":"Registered","data":{{"user":{}}}}}"#, USER_JSON),
        );

        let user = UserUseCases::new(&client)
            .register("Jane", "jane@flowmart.co.ke", "+254712345678", "Passw0rd@")
            .await
            .unwrap();
        assert_eq!(user.id, 3);

        let request = transport.last_request();
        assert_eq!(request.url, "https://flowmart.banit.co.ke/register");
        assert_eq!(request.form_value("phone"), Some("+254712345678"));
        assert_eq!(request.form_value("password"), Some("Passw0rd@"));
    }

    #[tokio::test]
    async fn test_login_stores_token_and_next_call_uses_it() {
        let (transport, store, client) = setup();
        transport.push_json(
            200,
            &format!(
                r#"{{"status":"success","data":{{"api_key":"tok-new-1234","message":"Login successful","user":{}}}}}"#,
                USER_JSON
            ),
        );
        transport.push_json(200, &format!(r#"{{"data":{{"user":{}}}}}"#, USER_JSON));
        let users = UserUseCases::new(&client);

        let session = users.login("jane@flowmart.co.ke", "anything").await.unwrap();
        assert_eq!(session.api_key, "tok-new-1234");
        assert_eq!(store.get().as_deref(), Some("tok-new-1234"));

        users.fetch_profile().await.unwrap();
        let requests = transport.requests();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(requests[1].header("Authorization"), Some("Bearer tok-new-1234"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_credential_untouched() {
        let (transport, store, client) = setup();
        store.set("previous");
        transport.push_json(401, r#"{"status":"error","message":"Invalid credentials"}"#);

        let err = UserUseCases::new(&client)
            .login("jane@flowmart.co.ke", "wrong")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Invalid credentials");
        assert_eq!(store.get().as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn test_login_requires_password() {
        let (transport, _, client) = setup();
        let err = UserUseCases::new(&client)
            .login("jane@flowmart.co.ke", "  ")
            .await
            .unwrap_err();
        assert_eq!(err.message(), PASSWORD_BLANK_MESSAGE);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_profile_sends_only_provided_fields() {
        let (transport, _, client) = setup();
        transport.push_json(200, &format!(r#"{{"data":{{"user":{}}}}}"#, USER_JSON));

        let update = ProfileUpdate {
            phone: Some("+254712345678".to_string()),
            ..ProfileUpdate::default()
        };
        UserUseCases::new(&client).update_profile(&update).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(
            request.form,
            Some(vec![("phone".to_string(), "+254712345678".to_string())])
        );
    }

    #[tokio::test]
    async fn test_update_profile_validates_provided_fields() {
        let (transport, _, client) = setup();
        let update = ProfileUpdate {
            email: Some("broken".to_string()),
            ..ProfileUpdate::default()
        };

        let err = UserUseCases::new(&client).update_profile(&update).await.unwrap_err();
        assert_eq!(err.message(), EMAIL_INVALID_MESSAGE);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_account_keeps_credential() {
        let (transport, store, client) = setup();
        store.set("tok-keep");
        transport.push_json(200, r#"{"status":"success","message":"Account deleted"}"#);

        let ack = UserUseCases::new(&client).delete_account().await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Account deleted"));
        assert_eq!(store.get().as_deref(), Some("tok-keep"));
        assert_eq!(transport.last_request().method, HttpMethod::Delete);
    }
}
