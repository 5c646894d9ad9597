use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Product grouping owned by the server. Each operation returns a fresh copy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Free-form quantity as the server stores it, e.g. `"10"` or `"10 pcs"`.
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: String,
    pub category: Category,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserAccount {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }
}

/// Payload of a successful login.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub api_key: String,
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserAccount,
}

/// Result of an operation that returns no resource, such as a delete.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// The server has sent quantities both as "12" and as 12
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_optional_timestamps() {
        let category: Category = serde_json::from_value(json!({"id": 1, "name": "Electronics"})).unwrap();
        assert_eq!(category, Category::new(1, "Electronics"));
        assert!(category.created_at_utc().is_none());

        let category: Category = serde_json::from_value(json!({
            "id": 2,
            "name": "Groceries",
            "created_at": "2024-10-28T09:15:00.000000Z",
            "updated_at": "not a date"
        }))
        .unwrap();
        assert!(category.created_at_utc().is_some());
        assert!(category.updated_at_utc().is_none());
    }

    #[test]
    fn test_product_quantity_accepts_string_or_number() {
        let from_text: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Rice",
            "quantity": "25 kg",
            "category": {"id": 2, "name": "Groceries"}
        }))
        .unwrap();
        assert_eq!(from_text.quantity, "25 kg");

        let from_number: Product = serde_json::from_value(json!({
            "id": 8,
            "name": "Beans",
            "quantity": 40,
            "category": {"id": 2, "name": "Groceries"}
        }))
        .unwrap();
        assert_eq!(from_number.quantity, "40");
        assert_eq!(from_number.category.name, "Groceries");
    }

    #[test]
    fn test_session_reads_api_key() {
        let session: Session = serde_json::from_value(json!({
            "api_key": "tok-123",
            "message": "Login successful",
            "user": {"id": 3, "name": "Jane", "email": "jane@flowmart.co.ke", "phone": "+254712345678"}
        }))
        .unwrap();
        assert_eq!(session.api_key, "tok-123");
        assert_eq!(session.user.id, 3);
        assert!(session.user.created_at.is_none());
    }
}
