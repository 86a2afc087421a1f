//! User model for storage and API.

use crate::db::Document;
use serde::{Deserialize, Serialize};

/// User profile stored in the `users` collection.
///
/// Also the shape of the single-user session blob, which older clients wrote
/// with `id` instead of `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID (also used as document ID)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    /// Display name
    pub name: String,
    /// Social login provider ("google", "github", ...), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the user registered (ISO 8601)
    #[serde(default)]
    pub created_at: String,
    /// Most recent login (ISO 8601)
    #[serde(default)]
    pub last_login: String,
}

impl User {
    /// Whether the profile is owned by a social login provider.
    pub fn is_provider_managed(&self) -> bool {
        self.provider.is_some()
    }
}

impl Document for User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_legacy_id_key() {
        let user: User =
            serde_json::from_str(r#"{"id":"user_abc","email":"a@b.c","name":"A"}"#).unwrap();
        assert_eq!(user.id, "user_abc");
        assert!(!user.is_provider_managed());

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["_id"], "user_abc");
        assert!(value.get("provider").is_none());
    }
}
