use std::env;

use crate::errors::AppError;

/// Configuración de proceso, cargada una sola vez al arrancar y pasada
/// explícitamente vía `AppState` (nada de lookups globales).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub session_key: String,
    pub token: TokenConfig,
    pub http_port: u16,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub audience: String,
    pub secret_key: String,
}

fn requerida(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::ConfigError(format!("{} no está definida", key)))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let session_key = requerida("SESSION_KEY")?;
        if session_key.len() < 64 {
            return Err(AppError::ConfigError(
                "SESSION_KEY debe tener al menos 64 bytes".to_owned(),
            ));
        }

        let http_port = match env::var("HTTP_PORT") {
            Ok(valor) => valor
                .parse()
                .map_err(|_| AppError::ConfigError("HTTP_PORT no es un puerto válido".to_owned()))?,
            Err(_) => 8080,
        };

        Ok(AppConfig {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://inmobiliaria.db".to_owned()),
            session_key,
            token: TokenConfig {
                issuer: requerida("TOKEN_ISSUER")?,
                audience: requerida("TOKEN_AUDIENCE")?,
                secret_key: requerida("TOKEN_SECRET_KEY")?,
            },
            http_port,
        })
    }
}
