use std::path::PathBuf;

use thiserror::Error;
use warp::http::StatusCode;

use crate::types::ErrorBody;

pub const MISSING_FIELDS: &str = "Missing required fields: title, ingredients, steps, and prepTime";
pub const ALREADY_EXISTS: &str = "Recipe already exists";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Failures of the recipes file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("recipes file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed recipes file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode recipes: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("recipes write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Everything the recipes endpoint can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing or empty required fields")]
    MissingFields,
    #[error("recipe already exists")]
    AlreadyExists,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body sent to the caller. Storage causes are never disclosed.
    pub fn body(&self) -> ErrorBody {
        let error = match self {
            Self::MissingFields => MISSING_FIELDS,
            Self::AlreadyExists => ALREADY_EXISTS,
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED,
            Self::Storage(_) => INTERNAL_SERVER_ERROR,
        };
        ErrorBody { error }
    }

    pub fn into_response(self) -> warp::reply::Response {
        use warp::Reply;

        if let Self::Storage(ref e) = self {
            tracing::error!(error = %e, "recipes storage failure");
        }

        warp::reply::with_status(warp::reply::json(&self.body()), self.status()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn not_found_is_tagged_separately() {
        let err = StoreError::io("recipes.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = StoreError::io("recipes.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn storage_errors_share_the_generic_body() {
        let parse = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let errors = [
            ApiError::from(StoreError::NotFound { path: "a".into() }),
            ApiError::from(StoreError::Parse { path: "a".into(), source: parse }),
        ];

        for err in errors {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.body().error, INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn client_errors_map_to_fixed_messages() {
        assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingFields.body().error, MISSING_FIELDS);
        assert_eq!(ApiError::AlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
