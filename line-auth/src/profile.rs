//! Normalized LINE user profile.

use serde::{Deserialize, Serialize};

/// Minimal identity record returned by the LINE profile endpoint.
///
/// Serialized with the same camelCase field names LINE uses; optional fields
/// are omitted rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_line_profile_ignores_unknown_fields() {
        let profile: UserProfile = serde_json::from_value(json!({
            "userId": "U4af4980629",
            "displayName": "Brown",
            "pictureUrl": "https://profile.line-scdn.net/abcdefghijklmn",
            "statusMessage": "Hello, LINE!",
            "language": "en"
        }))
        .unwrap();

        assert_eq!(profile.user_id, "U4af4980629");
        assert_eq!(profile.display_name, "Brown");
        assert_eq!(
            profile.picture_url.as_deref(),
            Some("https://profile.line-scdn.net/abcdefghijklmn")
        );
        assert_eq!(profile.status_message.as_deref(), Some("Hello, LINE!"));
    }

    #[test]
    fn test_serialize_omits_absent_optional_fields() {
        let profile = UserProfile {
            user_id: "U1".to_string(),
            display_name: "Alice".to_string(),
            picture_url: None,
            status_message: None,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value, json!({"userId": "U1", "displayName": "Alice"}));
    }
}
