use std::future::{ready, Ready};
use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use architecture::ResponseBase;
use domain_maintenance::exception::{ErrorKind, MaintenanceException};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub mod order;
pub mod programming;

/// Header carrying the id of the user acting on the workflow.
pub const ACTOR_HEADER: &str = "X-Actor-Id";

pub type ApiResult<T> = Result<web::Json<ResponseBase<T>>, ApiError>;

fn ok<T: Serialize>(content: T) -> ApiResult<T> {
    Ok(web::Json(ResponseBase::ok(Some(content))))
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Maintenance(#[from] MaintenanceException),
    #[error("{0}")]
    InvalidRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Maintenance(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::InvalidRequest(message) => ResponseBase::<()>::err(400, message),
            ApiError::Maintenance(e) if e.kind() == ErrorKind::Internal => {
                tracing::error!("{e:?}");
                ResponseBase::err(e.status().into(), "Internal Error.")
            }
            ApiError::Maintenance(e) => ResponseBase::err(e.status().into(), &e.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

fn extract_uuid(s: &str) -> Result<Uuid, ApiError> {
    Uuid::from_str(s).map_err(|e| {
        ApiError::InvalidRequest(format!(r#"error when parse uuid from "{s}": {e}"#))
    })
}

/// Optional acting user, read from [`ACTOR_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub Option<Uuid>);

impl FromRequest for Actor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let actor = match req.headers().get(ACTOR_HEADER) {
            None => Ok(Actor(None)),
            Some(value) => value
                .to_str()
                .map_err(|e| ApiError::InvalidRequest(format!("invalid {ACTOR_HEADER}: {e}")))
                .and_then(extract_uuid)
                .map(|id| Actor(Some(id))),
        };
        ready(actor)
    }
}

/// Routes and extractor settings of the whole API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|e, _| ApiError::InvalidRequest(e.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|e, _| ApiError::InvalidRequest(e.to_string()).into()),
    )
    .service(programming::create)
    .service(programming::list)
    .service(programming::get)
    .service(programming::update)
    .service(programming::submit)
    .service(programming::analyze)
    .service(programming::approve)
    .service(programming::reject)
    .service(programming::cancel)
    .service(programming::delete)
    .service(programming::history)
    .service(order::list)
    .service(order::get)
    .service(order::schedule)
    .service(order::start)
    .service(order::start_from_programming)
    .service(order::pause)
    .service(order::resume)
    .service(order::checklist)
    .service(order::materials)
    .service(order::tools)
    .service(order::complete_task)
    .service(order::cancel_task)
    .service(order::finish)
    .service(order::cancel)
    .service(order::history);
}
