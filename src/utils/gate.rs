use crate::types::{error::AppError, identity::CallerContext};

/// Admit the caller only when its role is on the route's allow-list.
///
/// A caller without a role (no matching user, or not onboarded) is treated as
/// not signed in; a caller with some other role is forbidden.
pub fn authorize<'a>(caller: &'a CallerContext, allowed: &[&str]) -> Result<&'a str, AppError> {
    let role = caller.role.as_deref().ok_or(AppError::Unauthorized)?;

    if allowed.contains(&role) {
        Ok(role)
    } else {
        Err(AppError::Forbidden)
    }
}
