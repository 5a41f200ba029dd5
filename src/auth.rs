use std::time::{SystemTime, UNIX_EPOCH};

use actix_identity::Identity;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    config::TokenConfig,
    db,
    errors::AppError,
    models::{Rol, Usuario},
};

const TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub rol: Rol,
    pub iss: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
}

fn ahora_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Emite un JWT HS256 para el usuario autenticado, válido por una hora.
pub fn emitir_token(config: &TokenConfig, usuario: &Usuario) -> Result<String, AppError> {
    let iat = ahora_unix();
    let claims = Claims {
        sub: usuario.id.to_string(),
        rol: usuario.rol.clone(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(|e| {
        log::error!("Token encoding failed: {}", e);
        AppError::TokenInvalido
    })
}

/// Valida firma, vencimiento, emisor y audiencia.
pub fn validar_token(config: &TokenConfig, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::warn!("Token rejected: {}", e);
        AppError::TokenInvalido
    })
}

/// Extrae el token de una cabecera `Authorization: Bearer <token>`.
pub fn token_de_cabecera(valor: Option<&str>) -> Result<&str, AppError> {
    valor
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::TokenInvalido)
}

/// Carga el Usuario de la sesión actual; sin sesión se redirige a /login
/// vía `AppError::SesionRequerida`.
pub async fn usuario_actual(
    pool: &SqlitePool,
    identity: Option<Identity>,
) -> Result<Usuario, AppError> {
    let identity = identity.ok_or(AppError::SesionRequerida)?;
    let id: i64 = identity
        .id()?
        .parse()
        .map_err(|_| AppError::SesionRequerida)?;
    db::usuario::obtener_por_id(pool, id)
        .await?
        .ok_or(AppError::SesionRequerida)
}

/// Política "Administrador": sólo ese rol pasa.
pub fn exigir_administrador(usuario: &Usuario) -> Result<(), AppError> {
    if usuario.rol == Rol::Administrador {
        Ok(())
    } else {
        Err(AppError::Restringido)
    }
}

#[cfg(test)]
mod tests {
    use super::{emitir_token, validar_token, Claims, TOKEN_TTL_SECS};
    use crate::config::TokenConfig;
    use crate::models::{Rol, Usuario};

    fn config() -> TokenConfig {
        TokenConfig {
            issuer: "inmobiliaria-test".to_owned(),
            audience: "clientes-test".to_owned(),
            secret_key: "clave-secreta-de-prueba".to_owned(),
        }
    }

    fn usuario() -> Usuario {
        Usuario {
            id: 7,
            nombre_usuario: "admin".to_owned(),
            rol: Rol::Administrador,
            clave: "$argon2id$irrelevante".to_owned(),
        }
    }

    #[test]
    fn el_token_emitido_se_valida_con_la_misma_configuracion() {
        let config = config();
        let token = emitir_token(&config, &usuario()).unwrap();
        let claims: Claims = validar_token(&config, &token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.rol, Rol::Administrador);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn rechaza_audiencia_distinta() {
        let emisora = config();
        let token = emitir_token(&emisora, &usuario()).unwrap();

        let mut receptora = config();
        receptora.audience = "otra-audiencia".to_owned();
        assert!(validar_token(&receptora, &token).is_err());
    }

    #[test]
    fn rechaza_un_token_basura() {
        assert!(validar_token(&config(), "no-es-un-token").is_err());
    }
}
