use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    // request problems
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),

    // state conflicts
    #[error("organization already exists")]
    OrganizationAlreadyExists,
    #[error("user already belongs to an organization")]
    AlreadyInOrganization,
    #[error("conflict: {0}")]
    Conflict(String),

    // infra things
    #[error("email dispatch failed: {0}")]
    EmailDispatch(String),
    #[error("request timed out")]
    Timeout,
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::Db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::OrganizationAlreadyExists => "ORGANIZATION_ALREADY_EXISTS",
            Self::AlreadyInOrganization => "ALREADY_IN_ORGANIZATION",
            Self::Conflict(_) => "CONFLICT",
            Self::EmailDispatch(_) => "EMAIL_DISPATCH_FAILED",
            Self::Timeout => "TIMEOUT",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand back to the client. Infra failures never leak their detail.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Unauthorized => "User not signed in".to_string(),
            Self::InvalidToken => "Invalid token".to_string(),
            Self::Forbidden => "You don't have the required role".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::OrganizationAlreadyExists => "Organization already exists".to_string(),
            Self::AlreadyInOrganization => {
                "User with this email already belongs to an organization".to_string()
            }
            Self::EmailDispatch(_) => {
                "Invitation was saved but the email could not be sent".to_string()
            }
            Self::Timeout => "Request timed out".to_string(),
            Self::Db(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::OrganizationAlreadyExists | Self::AlreadyInOrganization | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::EmailDispatch(_) | Self::Db(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!(kind = self.kind(), error = %self, "request failed");
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message: self.public_message(),
        })
    }
}
