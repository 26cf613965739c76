//! Transport shapes for the HTTP API
//!
//! Responses are camelCase. Requests also accept PascalCase field names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Unity;

/// Public view of a user. There is deliberately no password field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

/// POST /users body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(alias = "Password")]
    pub password: String,
}

/// PUT /users/{id}/updatePassword body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(alias = "Password")]
    pub password: String,
}

/// Body of POST and PUT on stock items.
///
/// `id` and `userId` are not read; both always come from the request path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItemPayload {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Quantity")]
    pub quantity: f64,
    #[serde(alias = "Unity")]
    pub unity: Unity,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
}

/// Stock item as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItemDto {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unity: Unity,
    pub description: Option<String>,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_accepts_pascal_case() {
        let payload: GroceryItemPayload = serde_json::from_str(
            r#"{"Name": "Milk", "Quantity": 2, "Unity": "Liter", "UserId": "ignored"}"#,
        )
        .unwrap();
        assert_eq!(payload.name, "Milk");
        assert_eq!(payload.quantity, 2.0);
        assert_eq!(payload.unity, Unity::Liter);
        assert!(payload.description.is_none());
    }

    #[test]
    fn payload_requires_name_and_unity() {
        assert!(serde_json::from_str::<GroceryItemPayload>(r#"{"unity": "Gram"}"#).is_err());
        assert!(serde_json::from_str::<GroceryItemPayload>(r#"{"name": "Rice"}"#).is_err());
    }

    #[test]
    fn quantity_defaults_to_zero() {
        let payload: GroceryItemPayload =
            serde_json::from_str(r#"{"name": "Salt", "unity": "Package"}"#).unwrap();
        assert_eq!(payload.quantity, 0.0);
    }

    #[test]
    fn item_dto_is_camel_case() {
        let dto = GroceryItemDto {
            id: Uuid::nil(),
            name: "Milk".into(),
            quantity: 2.0,
            unity: Unity::Liter,
            description: None,
            user_id: Uuid::nil(),
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["userId"], Uuid::nil().to_string());
        assert_eq!(value["unity"], "Liter");
        assert!(value["description"].is_null());
    }
}
