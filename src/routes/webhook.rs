use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DBUserCreate, RWebhook};
use actix_web::{post, web};
use std::sync::Arc;
use tracing::info;

/// Identity providers we accept account events from.
const PROVIDERS: &[&str] = &["clerk"];

#[post("/webhook/{provider}")]
pub async fn webhook(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
    body: web::Json<RWebhook>,
) -> ApiResult<()> {
    let provider = path.into_inner();
    if !PROVIDERS.contains(&provider.as_str()) {
        return Err(AppError::NotFound("webhook provider"));
    }

    let data = body
        .into_inner()
        .data
        .ok_or_else(|| AppError::Validation("Invalid webhook data".to_string()))?;
    let create = DBUserCreate::try_from(data).map_err(AppError::Validation)?;

    let user = db.provision_from_webhook(create).await?;
    info!(user_id = user.id, %provider, "user provisioned from webhook");

    Ok(ApiResponse::Message("User added successfully".to_string()))
}
