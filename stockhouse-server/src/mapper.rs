//! Field copies between storage entities and DTOs

use uuid::Uuid;

use crate::dto::{CreateUserRequest, GroceryItemDto, GroceryItemPayload, UserResponse};
use crate::models::{GroceryItem, User};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl From<&GroceryItem> for GroceryItemDto {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            unity: item.unity,
            description: item.description.clone(),
            user_id: item.user_id,
        }
    }
}

/// New user from a create request. The plaintext password is dropped here;
/// callers pass the already computed hash.
pub fn user_from_request(request: CreateUserRequest, password_hash: String) -> User {
    User::new(request.username, password_hash)
}

/// New item owned by `owner`.
pub fn item_from_payload(payload: GroceryItemPayload, owner: Uuid) -> GroceryItem {
    GroceryItem::new(
        owner,
        payload.name,
        payload.quantity,
        payload.unity,
        payload.description,
    )
}

/// Copy the editable fields of `payload` onto `item`.
///
/// Identity, owner and version are left alone.
pub fn merge_item(item: &mut GroceryItem, payload: GroceryItemPayload) {
    item.name = payload.name;
    item.quantity = payload.quantity;
    item.unity = payload.unity;
    item.description = payload.description;
}
