use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserInfo;
use crate::utils::webutils::Caller;
use actix_web::{get, web};
use std::sync::Arc;

/// Any verified session may read a user's profile.
#[get("/user/{external_id}")]
pub async fn user_info(
    _caller: Caller,
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<UserInfo> {
    let info = db.get_user_info(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(info))
}
