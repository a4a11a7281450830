use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::model::LeaveStatus;

/// Business-rule failures raised by the validation engine or the service.
/// These are semantically invalid requests, never retried internally.
#[derive(Debug, Display)]
pub enum LeaveError {
    #[display(fmt = "{} with id {} not found", entity, id)]
    NotFound { entity: &'static str, id: u64 },

    #[display(
        fmt = "employee already has approved or pending leave between {} and {}",
        start,
        end
    )]
    Overlap { start: NaiveDate, end: NaiveDate },

    #[display(fmt = "annual leave exceeds maximum of {} days per year", limit)]
    QuotaExceeded { limit: i64 },

    #[display(fmt = "sick leave requires a non-empty reason")]
    MissingReason,

    #[display(fmt = "start date cannot be after end date")]
    InvalidRange,

    #[display(
        fmt = "only pending leave requests can be approved, current status is {}",
        status
    )]
    InvalidState { status: LeaveStatus },

    #[display(fmt = "database error: {}", _0)]
    Store(sqlx::Error),
}

impl std::error::Error for LeaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaveError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for LeaveError {
    fn from(e: sqlx::Error) -> Self {
        LeaveError::Store(e)
    }
}

/// One transport mapping for every endpoint: 404 for missing ids, 400 for
/// rule violations, 500 for storage faults (details go to the log only).
impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::NotFound { .. } => StatusCode::NOT_FOUND,
            LeaveError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LeaveError::Store(e) = self {
            error!(error = %e, "Storage failure");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
