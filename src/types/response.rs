use crate::types::error::AppError;
use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// Body of every endpoint that only reports what happened.
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageRes {
    pub message: String,
}

pub enum ApiResponse<T> {
    Ok(T),
    EmptyOk,
    Message(String),
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(v) => HttpResponse::Ok().json(v),
            ApiResponse::EmptyOk => HttpResponse::Ok().finish(),
            ApiResponse::Message(message) => HttpResponse::Ok().json(MessageRes { message }),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
