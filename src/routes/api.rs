//! Acceso estilo API: login con credenciales que devuelve un JWT y
//! endpoints JSON protegidos por `Authorization: Bearer`.

use actix_web::{
    get, http::header, post,
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use serde::{Deserialize, Serialize};

use crate::{auth, db, errors::AppError, AppState};

#[derive(Deserialize)]
pub struct CredencialesApi {
    pub nombre_usuario: String,
    pub clave: String,
}

#[derive(Serialize)]
struct RespuestaToken {
    token: String,
}

fn claims_del_pedido(state: &AppState, request: &HttpRequest) -> Result<auth::Claims, AppError> {
    let valor = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = auth::token_de_cabecera(valor)?;
    auth::validar_token(&state.config.token, token)
}

#[post("/api/login")]
pub async fn login_token(
    web::Json(credenciales): web::Json<CredencialesApi>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let usuario = db::usuario::obtener_por_nombre(&state.db_pool, &credenciales.nombre_usuario)
        .await?
        .filter(|u| crate::passwords::verificar_clave(&credenciales.clave, &u.clave))
        .ok_or(AppError::TokenInvalido)?;

    let token = auth::emitir_token(&state.config.token, &usuario)?;
    Ok(HttpResponse::Ok().json(RespuestaToken { token }))
}

#[get("/api/inmuebles")]
pub async fn inmuebles(
    state: Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    claims_del_pedido(&state, &request)?;
    let lista = db::inmueble::obtener_todos(&state.db_pool).await?;
    Ok(HttpResponse::Ok().json(lista))
}

#[get("/api/contratos")]
pub async fn contratos(
    state: Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    claims_del_pedido(&state, &request)?;
    let lista = db::contrato::obtener_todos(&state.db_pool).await?;
    Ok(HttpResponse::Ok().json(lista))
}
