use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use inmobiliaria::config::{AppConfig, TokenConfig};
use inmobiliaria::models::{Propietario, Rol, Usuario};
use inmobiliaria::{db, passwords, AppState};

/// Base en memoria con el esquema migrado. Una sola conexión, así todas
/// las operaciones ven la misma base.
pub async fn pool() -> SqlitePool {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub fn config_de_prueba() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_owned(),
        session_key: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_owned(),
        token: TokenConfig {
            issuer: "inmobiliaria-test".to_owned(),
            audience: "clientes-test".to_owned(),
            secret_key: "clave-secreta-de-prueba".to_owned(),
        },
        http_port: 8080,
    }
}

pub async fn estado() -> AppState {
    AppState {
        db_pool: pool().await,
        config: config_de_prueba(),
    }
}

pub fn propietario_ana(clave_hash: &str) -> Propietario {
    Propietario {
        id: 0,
        nombre: "Ana".to_owned(),
        apellido: "Diaz".to_owned(),
        dni: "12345678".to_owned(),
        telefono: "555-0001".to_owned(),
        email: "ana@example.com".to_owned(),
        clave: clave_hash.to_owned(),
    }
}

pub async fn crear_admin(pool: &SqlitePool, clave: &str) -> Usuario {
    let usuario = Usuario {
        id: 0,
        nombre_usuario: "admin".to_owned(),
        rol: Rol::Administrador,
        clave: passwords::hash_clave(clave).unwrap(),
    };
    db::usuario::alta(pool, &usuario).await.unwrap()
}

pub async fn crear_empleado(pool: &SqlitePool, clave: &str) -> Usuario {
    let usuario = Usuario {
        id: 0,
        nombre_usuario: "empleado".to_owned(),
        rol: Rol::Empleado,
        clave: passwords::hash_clave(clave).unwrap(),
    };
    db::usuario::alta(pool, &usuario).await.unwrap()
}
