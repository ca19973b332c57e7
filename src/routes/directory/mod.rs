pub mod employees;
pub mod managers;

use crate::types::error::AppError;
use crate::types::identity::CallerContext;

fn caller_organization(caller: &CallerContext) -> Result<i32, AppError> {
    caller
        .organization_id
        .ok_or_else(|| AppError::Validation("organization id is required".to_string()))
}
