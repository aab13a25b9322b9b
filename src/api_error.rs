use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use serde_json::json;
use thiserror::Error;

use std::io::Cursor;
use std::sync::PoisonError;

/// Error taxonomy for the task store API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for ApiError {
    fn from(_: PoisonError<T>) -> ApiError {
        ApiError::LockPoisoned
    }
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) => Status::UnprocessableEntity,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Storage(_) | ApiError::LockPoisoned => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        if status == Status::InternalServerError {
            tracing::error!(error = %self, "request failed");
        }

        let body = json!({ "error": self.to_string() }).to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert_eq!(
            ApiError::Validation("title must not be blank".to_string()).status(),
            Status::UnprocessableEntity
        );
        assert_eq!(
            ApiError::NotFound("no task with id 7".to_string()).status(),
            Status::NotFound
        );
        assert_eq!(ApiError::LockPoisoned.status(), Status::InternalServerError);
    }
}
