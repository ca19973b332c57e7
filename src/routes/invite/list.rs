use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::identity::{ADMIN, MANAGER};
use crate::types::invitation::InvitationListItem;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::gate::authorize;
use crate::utils::webutils::Caller;
use actix_web::{get, web};
use std::sync::Arc;

#[get("/invitations")]
pub async fn invitations(
    caller: Caller,
    db: web::Data<Arc<DbService>>,
) -> ApiResult<Vec<InvitationListItem>> {
    let role = authorize(&caller, &[ADMIN, MANAGER])?;

    let organization_id = caller
        .organization_id
        .ok_or_else(|| AppError::Validation("organization id is required".to_string()))?;
    let email = caller.email.as_deref().unwrap_or_default();

    let list = db
        .list_invitations_for_caller(organization_id, role, email)
        .await?;
    Ok(ApiResponse::Ok(list))
}
