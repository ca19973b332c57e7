use crate::db::service::DbService;
use crate::types::invitation::InvitationDetail;
use crate::types::response::{ApiResponse, ApiResult};
use actix_web::{get, post, web};
use std::sync::Arc;

/// Lets the registration page show which organization and role a link grants.
#[get("/register/{token}")]
pub async fn invitation_detail(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<InvitationDetail> {
    let detail = db.get_invitation_detail(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(detail))
}

#[post("/register/{token}")]
pub async fn accept(db: web::Data<Arc<DbService>>, path: web::Path<String>) -> ApiResult<()> {
    db.accept_invitation(&path.into_inner()).await?;
    Ok(ApiResponse::Message("Invitation accepted".to_string()))
}
