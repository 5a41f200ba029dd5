use actix_identity::Identity;
use actix_web::{
    get,
    web::{self, Data},
    HttpResponse,
};
use tera::Context;

use crate::{db, errors::AppError, routes::render, AppState};

#[get("/")]
pub async fn index_handler(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let propietarios = db::propietario::obtener_todos(&state.db_pool).await?;
    let inquilinos = db::inquilino::obtener_todos(&state.db_pool).await?;
    let inmuebles = db::inmueble::obtener_todos(&state.db_pool).await?;
    let contratos = db::contrato::obtener_todos(&state.db_pool).await?;
    let pagos = db::pago::obtener_todos(&state.db_pool).await?;

    let id = match identity.map(|id| id.id()) {
        None => "anonymous".to_owned(),
        Some(Ok(id)) => id,
        Some(Err(err)) => return Err(AppError::IdentityError(err)),
    };

    let mut context = Context::new();
    context.insert("title", "Inmobiliaria");
    context.insert("cantidad_propietarios", &propietarios.len());
    context.insert("cantidad_inquilinos", &inquilinos.len());
    context.insert("cantidad_inmuebles", &inmuebles.len());
    context.insert("cantidad_contratos", &contratos.len());
    context.insert("cantidad_pagos", &pagos.len());
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context.insert("identity", &id);
    render("home.html", &context)
}

fn pagina_ruta(valor: &str) -> Result<HttpResponse, AppError> {
    let mut context = Context::new();
    context.insert("title", "Ruteo");
    context.insert("valor", valor);
    render("ruta.html", &context)
}

/// Ruta fija de demostración: /ruteo/{valor}.
#[get("/ruteo/{valor}")]
pub async fn ruta_handler(valor: web::Path<String>) -> Result<HttpResponse, AppError> {
    pagina_ruta(&valor)
}

/// Sin segmento de valor, la ruta cae en "defecto".
#[get("/ruteo")]
pub async fn ruta_default_handler() -> Result<HttpResponse, AppError> {
    pagina_ruta("defecto")
}

/// Acción parametrizada por fecha: /home/fecha/{anio}/{mes}/{dia}.
#[get("/home/fecha/{anio}/{mes}/{dia}")]
pub async fn fecha_handler(path: web::Path<(i32, u32, u32)>) -> Result<HttpResponse, AppError> {
    let (anio, mes, dia) = path.into_inner();
    let fecha = chrono::NaiveDate::from_ymd_opt(anio, mes, dia).ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Fecha");
    context.insert("fecha", &fecha);
    render("fecha.html", &context)
}

/// Página de acceso denegado para usuarios sin el rol requerido.
#[get("/restringido")]
pub async fn restringido_handler() -> Result<HttpResponse, AppError> {
    let mut context = Context::new();
    context.insert("title", "Acceso restringido");
    render("restringido.html", &context)
}
