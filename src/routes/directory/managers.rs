use super::caller_organization;
use crate::db::service::DbService;
use crate::types::directory::ManagerSummary;
use crate::types::identity::ADMIN;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::gate::authorize;
use crate::utils::webutils::Caller;
use actix_web::{get, web};
use std::sync::Arc;

#[get("/managers")]
pub async fn managers(
    caller: Caller,
    db: web::Data<Arc<DbService>>,
) -> ApiResult<Vec<ManagerSummary>> {
    authorize(&caller, &[ADMIN])?;
    let organization_id = caller_organization(&caller)?;

    Ok(ApiResponse::Ok(db.list_managers(organization_id).await?))
}
