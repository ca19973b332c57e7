use serde::{Deserialize, Serialize};

pub const ADMIN: &str = "admin";
pub const MANAGER: &str = "manager";
pub const EMPLOYEE: &str = "employee";

/// Claims we read from the identity provider's session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Who is calling, resolved once per request from a verified token.
///
/// Everything except `external_id` stays `None` when the subject has no
/// matching user row; authorization then fails closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    pub external_id: String,
    pub user_id: Option<i32>,
    pub role: Option<String>,
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub email: Option<String>,
}

impl CallerContext {
    pub fn anonymous(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..Default::default()
        }
    }
}
