use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Every failure the orchestration workflow can surface maps to one variant
/// carrying the offending identifier or the upstream cause. External
/// collaborator failures keep their stable message; the raw cause is logged
/// where the failure happens, never exposed verbatim in the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("member not found: memberId = {0}")]
    MemberNotFound(Uuid),

    #[error("post not found: postId = {0}")]
    PostNotFound(Uuid),

    #[error("no image exists for this post")]
    ImageNotFound,

    #[error("image upload to object storage failed")]
    UploadFailure(String),

    #[error("image delete from object storage failed")]
    DeleteFailure(String),

    #[error("could not parse object storage url")]
    UrlParsingFailure(String),

    #[error("tag recommendation call failed")]
    RecommendationFailure(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for API clients and log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MemberNotFound(_) => "MEMBER_NOT_FOUND_404",
            AppError::PostNotFound(_) => "POST_NOT_FOUND_404",
            AppError::ImageNotFound => "IMAGE_NOT_FOUND_404",
            AppError::UploadFailure(_) => "STORAGE_UPLOAD_FAIL_500",
            AppError::DeleteFailure(_) => "STORAGE_DELETE_FAIL_500",
            AppError::UrlParsingFailure(_) => "STORAGE_URL_PARSING_500",
            AppError::RecommendationFailure(_) => "TAG_RECOMMENDATION_FAIL_500",
            AppError::Validation(_) => "BAD_REQUEST_400",
            AppError::Database(_) => "DATABASE_ERROR_500",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR_500",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MemberNotFound(_)
            | AppError::PostNotFound(_)
            | AppError::ImageNotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UploadFailure(_)
            | AppError::DeleteFailure(_)
            | AppError::UrlParsingFailure(_)
            | AppError::RecommendationFailure(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        let member_id = Uuid::new_v4();
        assert_eq!(
            AppError::MemberNotFound(member_id).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::PostNotFound(member_id).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::ImageNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failures_map_to_500_with_stable_codes() {
        let err = AppError::UploadFailure("connection reset".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "STORAGE_UPLOAD_FAIL_500");

        let err = AppError::DeleteFailure("timeout".into());
        assert_eq!(err.code(), "STORAGE_DELETE_FAIL_500");

        let err = AppError::RecommendationFailure("503".into());
        assert_eq!(err.code(), "TAG_RECOMMENDATION_FAIL_500");
    }

    #[test]
    fn upstream_cause_is_not_exposed_in_message() {
        let err = AppError::UploadFailure("secret-internal-host refused".into());
        assert!(!err.to_string().contains("secret-internal-host"));
    }

    #[test]
    fn member_not_found_message_carries_the_id() {
        let member_id = Uuid::new_v4();
        let msg = AppError::MemberNotFound(member_id).to_string();
        assert!(msg.contains(&member_id.to_string()));
    }
}
