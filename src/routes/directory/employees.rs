use super::caller_organization;
use crate::db::service::DbService;
use crate::types::directory::EmployeeSummary;
use crate::types::identity::{ADMIN, MANAGER};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::gate::authorize;
use crate::utils::webutils::Caller;
use actix_web::{get, web};
use std::sync::Arc;

#[get("/employees")]
pub async fn employees(
    caller: Caller,
    db: web::Data<Arc<DbService>>,
) -> ApiResult<Vec<EmployeeSummary>> {
    let role = authorize(&caller, &[ADMIN, MANAGER])?;
    let organization_id = caller_organization(&caller)?;

    let list = db
        .list_employees(organization_id, role, caller.user_id)
        .await?;
    Ok(ApiResponse::Ok(list))
}
