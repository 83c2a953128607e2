use serde::Serialize;
use serde_json::{json, Value};

use super::dashboard::unwrap_data;
use crate::api::{endpoints, Gateway};

/// A landlord/tenant profile page: the user record and their properties.
/// Each half loads and fails independently.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerProfile {
    pub profile: Result<Value, String>,
    pub properties: Result<Vec<Value>, String>,
}

pub async fn load_owner(gw: &Gateway, user_id: &str) -> OwnerProfile {
    let (profile, properties) = futures::join!(
        endpoints::get_profile(gw, user_id),
        endpoints::get_user_properties(gw, user_id),
    );

    let profile = match profile {
        Ok(body) => {
            let data = unwrap_data(&body);
            if data.is_null() || data.as_object().is_some_and(|o| o.is_empty()) {
                Err("No profile data returned".to_string())
            } else {
                Ok(data.clone())
            }
        }
        Err(e) => Err(non_empty(e.message(), "Failed to load profile")),
    };

    let properties = match properties {
        Ok(body) => {
            let list = body
                .get("properties")
                .or_else(|| body.get("data"))
                .unwrap_or(&body)
                .as_array()
                .cloned()
                .unwrap_or_default();
            if list.is_empty() {
                Err("No properties found".to_string())
            } else {
                Ok(list)
            }
        }
        Err(e) => Err(non_empty(e.message(), "Failed to load properties")),
    };

    OwnerProfile { profile, properties }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Update body for a moderation action label such as "Suspend" or "Approve"
pub fn action_payload(label: &str) -> Value {
    let label = label.trim().to_lowercase();
    if label.contains("delete") {
        json!({ "is_deleted": true })
    } else if label.contains("suspend") {
        json!({ "status": "suspended" })
    } else if label.contains("approve") {
        json!({ "status": "approved" })
    } else if label.contains("reject") {
        json!({ "status": "rejected" })
    } else {
        json!({ "status": label })
    }
}

/// Apply a moderation action; both outcomes carry the message to show
pub async fn apply_action(gw: &Gateway, user_id: &str, label: &str) -> Result<String, String> {
    match endpoints::update_user(gw, user_id, action_payload(label)).await {
        Ok(_) => Ok(format!("{} action applied", label)),
        Err(e) => {
            tracing::error!("Failed to apply {} to {}: {}", label, user_id, e);
            Err(format!("Failed to {}. Please try again.", label))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_payloads() {
        assert_eq!(action_payload("Delete"), json!({"is_deleted": true}));
        assert_eq!(action_payload("Suspended"), json!({"status": "suspended"}));
        assert_eq!(action_payload("Approve"), json!({"status": "approved"}));
        assert_eq!(action_payload("Reject profile"), json!({"status": "rejected"}));
        assert_eq!(action_payload("On Hold"), json!({"status": "on hold"}));
    }

    #[test]
    fn empty_messages_fall_back() {
        assert_eq!(non_empty(String::new(), "Failed to load profile"), "Failed to load profile");
        assert_eq!(non_empty("Not found".into(), "x"), "Not found");
    }
}
