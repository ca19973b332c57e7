use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::Header;
use actix_web::middleware::Next;
use actix_web::{web, FromRequest, HttpRequest, ResponseError};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::EnvConfig;
use crate::db::service::DbService;
use crate::types::{error::AppError, identity::CallerContext};
use crate::utils::identity::IdentityVerifier;

/// Cookie the identity provider's frontend SDK stores the session token in.
pub const SESSION_COOKIE: &str = "__session";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Bearer header first, session cookie second.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Ok(auth) = Authorization::<Bearer>::parse(req) {
        let scheme = auth.into_scheme();
        let token = scheme.token().trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Verified caller, resolved by the extractor before the handler runs.
#[derive(Debug, Clone)]
pub struct Caller(pub CallerContext);

impl Deref for Caller {
    type Target = CallerContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = session_token(req);
        let verifier = req.app_data::<web::Data<IdentityVerifier>>().cloned();
        let db = req.app_data::<web::Data<Arc<DbService>>>().cloned();

        Box::pin(async move {
            let token = token.ok_or(AppError::Unauthorized)?;
            let (verifier, db) = match (verifier, db) {
                (Some(v), Some(d)) => (v, d),
                _ => {
                    return Err(AppError::Internal(
                        "identity verifier or database missing from app data".to_string(),
                    ))
                }
            };

            let external_id = verifier.verify(&token)?;
            let context = db.caller_context(&external_id).await?;

            Ok(Caller(context))
        })
    }
}

/// Bounds every request. Dropping the handler future also drops any store call it awaits.
pub async fn request_timeout(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let limit = req
        .app_data::<web::Data<EnvConfig>>()
        .map(|c| c.request_timeout)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
    let http_req = req.request().clone();

    match tokio::time::timeout(limit, next.call(req)).await {
        Ok(res) => res.map(ServiceResponse::map_into_left_body),
        Err(_) => {
            warn!(path = %http_req.path(), ?limit, "request timed out");
            let res = AppError::Timeout.error_response();
            Ok(ServiceResponse::new(http_req, res).map_into_right_body())
        }
    }
}

/// Body parse failures become our own 400 instead of actix's plain text one.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::Validation(format!("invalid request body: {err}")).into())
}
