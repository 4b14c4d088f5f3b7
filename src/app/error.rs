use actix_web::{
  error::ResponseError,
  HttpResponse
};
use derive_more::Display;
use color_eyre::Report;
use log::error;
use rusqlite::ffi::ErrorCode;
use serde::Serialize;
use crate::db::articles::ParamError;

// Full error output should only appear in logs, the
// messages below are what random internet people get
// to see.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "Internal Server Error")]
  InternalServerError(String),
  #[display(fmt = "Database Error")]
  DatabaseError(String),
  #[display(fmt = "Not Found: {}", _0)]
  NotFound(String),
  #[display(fmt = "Bad Request: {}", _0)]
  BadRequest(String)
}

// The old API used JSON bodies shaped like
// { "msg": "..." } for its errors, so we do too.
#[derive(Serialize)]
struct ErrorBody {
  msg: String
}

impl ResponseError for Error {
  fn error_response(&self) -> HttpResponse {
    let body = ErrorBody {
      msg: self.to_string()
    };
    match self {
      Error::InternalServerError(detail) | Error::DatabaseError(detail) => {
        error!("Responding 500 - {}", detail);
        HttpResponse::InternalServerError().json(body)
      },
      Error::NotFound(_) => HttpResponse::NotFound().json(body),
      Error::BadRequest(_) => HttpResponse::BadRequest().json(body)
    }
  }
}

impl From<ParamError> for Error {
  fn from(e: ParamError) -> Self {
    Error::BadRequest(e.to_string())
  }
}

// Storage failures reach the handlers as eyre reports.
// Foreign key and not-null violations mean the client
// sent a reference to something that doesn't exist, so
// those become 400s. Anything else is a plain server
// error, never swallowed.
pub fn map_db_error(e: Report) -> Error {
  if let Some(rusqlite::Error::SqliteFailure(failure, _)) =
    e.downcast_ref::<rusqlite::Error>() {
      if failure.code == ErrorCode::ConstraintViolation {
        return Error::BadRequest(
          String::from("Request references a record that does not exist")
        );
      }
  }
  Error::DatabaseError(e.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::test_support::seeded_pool;
  use crate::db::comments::insert_comment;

  #[test]
  fn constraint_violations_map_to_bad_request() {
    let pool = seeded_pool();
    let err = insert_comment(&pool, 1, "jt", "hello").unwrap_err();
    match map_db_error(err) {
      Error::BadRequest(_) => {},
      other => panic!("Expected BadRequest, got {:?}", other)
    }
  }

  #[test]
  fn other_reports_map_to_database_error() {
    let report = eyre::eyre!("The disk is on fire");
    match map_db_error(report) {
      Error::DatabaseError(_) => {},
      other => panic!("Expected DatabaseError, got {:?}", other)
    }
  }
}
