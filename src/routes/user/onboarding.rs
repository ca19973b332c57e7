use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::ROnboarding;
use actix_web::{post, web};
use std::sync::Arc;

#[post("/{external_id}/onboarding")]
pub async fn onboarding(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
    body: web::Json<ROnboarding>,
) -> ApiResult<()> {
    let external_id = path.into_inner();
    let ROnboarding { role, organization } = body.into_inner();
    let role = role.ok_or_else(|| AppError::Validation("role is required".to_string()))?;

    db.onboard(&external_id, role, organization.as_deref()).await?;

    Ok(ApiResponse::Message("User onboarding complete".to_string()))
}
