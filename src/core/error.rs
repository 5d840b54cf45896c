use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Reqwest error: {0}")]
    HTTPClient(#[from] reqwest::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("no session secret configured for a production deployment")]
    MissingSecret,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Reqwest error: {0}")]
    HTTPClient(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Missing email or password")]
    MissingCredentials,
    #[error("Prompt cannot be empty")]
    EmptyPrompt,
    #[error("imageUrl must be a non-empty string")]
    EmptyImageUrl,
    #[error("Comment text cannot be empty")]
    EmptyComment,
    #[error("Missing or invalid imageId")]
    MissingImageId,
    #[error("Invalid id")]
    InvalidId,
    #[error("Image not found")]
    ImageNotFound,
    #[error("Comment not found")]
    CommentNotFound,
    #[error("Forbidden")]
    Forbidden,
    #[error("Image provider error: {0}")]
    ImageProvider(String),
    #[error("Failed to retrieve image")]
    ImageFetch,
    #[error("Server misconfiguration")]
    Misconfigured,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let (status, message) = match self {
            Error::Sql(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SQL error"),
            Error::Bcrypt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Bcrypt error"),
            Error::Serialize(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Serialization error"),
            Error::HTTPClient(_) => (StatusCode::BAD_GATEWAY, "Upstream request failed"),
            Error::IO(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO error"),
            Error::AuthenticationRequired => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists"),
            Error::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email address"),
            Error::InvalidPassword(_) => (StatusCode::BAD_REQUEST, "Invalid password"),
            Error::MissingCredentials => (StatusCode::BAD_REQUEST, "Missing email or password"),
            Error::EmptyPrompt => (StatusCode::BAD_REQUEST, "Prompt cannot be empty"),
            Error::EmptyImageUrl => {
                (StatusCode::BAD_REQUEST, "imageUrl must be a non-empty string")
            }
            Error::EmptyComment => (StatusCode::BAD_REQUEST, "Comment text cannot be empty"),
            Error::MissingImageId => (StatusCode::BAD_REQUEST, "Missing or invalid imageId"),
            Error::InvalidId => (StatusCode::BAD_REQUEST, "Invalid id"),
            Error::ImageNotFound => (StatusCode::NOT_FOUND, "Image not found"),
            Error::CommentNotFound => (StatusCode::NOT_FOUND, "Comment not found"),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            Error::ImageProvider(_) => (StatusCode::BAD_GATEWAY, "Image provider error"),
            Error::ImageFetch => (StatusCode::BAD_GATEWAY, "Failed to retrieve image"),
            Error::Misconfigured => (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfiguration"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
