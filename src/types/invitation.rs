use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RInvite {
    pub email: Option<String>,
}

/// Everything needed to issue an invitation. Role and organization come from the sender.
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub email: String,
    pub role_id: i32,
    pub organization_id: i32,
    pub sender_email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDetail {
    pub invitation_id: i32,
    pub token: String,
    pub organization_id: Option<i32>,
    pub organization_name: Option<String>,
    pub role_id: Option<i32>,
    pub role_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct InvitationListItem {
    pub invitation_id: i32,
    pub email: String,
    pub sender_email: String,
    pub role: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTime<Utc>,
}
