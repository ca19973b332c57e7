use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Envelope posted by the identity provider when an account is created.
#[derive(Serialize, Deserialize, Debug)]
pub struct RWebhook {
    pub data: Option<WebhookUser>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WebhookUser {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<WebhookEmail>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WebhookEmail {
    pub email_address: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DBUserCreate {
    pub external_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl TryFrom<WebhookUser> for DBUserCreate {
    type Error = String;

    fn try_from(data: WebhookUser) -> Result<Self, Self::Error> {
        if data.id.trim().is_empty() {
            return Err("data.id is required".to_string());
        }
        let email = data
            .email_addresses
            .into_iter()
            .next()
            .map(|e| e.email_address)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| "data.email_addresses[0].email_address is required".to_string())?;

        Ok(DBUserCreate {
            external_id: data.id,
            email,
            first_name: data.first_name,
            last_name: data.last_name,
        })
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ROnboarding {
    pub role: Option<i32>,
    pub organization: Option<String>,
}

/// User joined with role and organization names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i32,
    pub external_id: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization: Option<String>,
    pub organization_id: Option<i32>,
    pub onboarded: bool,
}
