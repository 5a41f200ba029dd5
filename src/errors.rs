use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sqlx::Error as SqlxError;
use std::env::VarError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Login required")]
    SesionRequerida,

    #[error("Insufficient role")]
    Restringido,

    #[error("Invalid or expired token")]
    TokenInvalido,

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("Identity error: {0}")]
    IdentityError(#[from] actix_identity::error::GetIdentityError),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Password hash error: {0}")]
    PasswordError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::SesionRequerida | AppError::Restringido => StatusCode::SEE_OTHER,
            AppError::TokenInvalido => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // El detalle queda en el log; al cliente nunca le llega el mensaje
    // crudo del driver ni un stack trace.
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("No encontrado"),
            AppError::SesionRequerida => HttpResponse::SeeOther()
                .append_header(("Location", "/login"))
                .finish(),
            AppError::Restringido => HttpResponse::SeeOther()
                .append_header(("Location", "/restringido"))
                .finish(),
            AppError::TokenInvalido => {
                HttpResponse::Unauthorized().body("Token inválido o vencido")
            }
            otro => {
                log::error!("Unhandled application error: {}", otro);
                HttpResponse::InternalServerError().body("Error interno del servidor")
            }
        }
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}
