use actix_identity::Identity;
use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tera::Context;

use crate::{
    auth, db,
    errors::AppError,
    models::Contrato,
    routes::{dejar_flash, flashes_al_contexto, redirigir, render, FLASH_ID, FLASH_MENSAJE},
    AppState,
};

#[derive(Deserialize, Serialize)]
pub struct ContratoForm {
    pub id_inquilino: i64,
    pub id_inmueble: i64,
    pub fecha_desde: NaiveDate,
    pub fecha_hasta: NaiveDate,
    pub monto_mensual: f64,
}

impl ContratoForm {
    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        if self.fecha_hasta <= self.fecha_desde {
            errores.push("La fecha de fin debe ser posterior a la de inicio".to_owned());
        }
        if self.monto_mensual <= 0.0 {
            errores.push("El monto mensual debe ser mayor a cero".to_owned());
        }
        errores
    }

    fn a_entidad(&self, id: i64) -> Contrato {
        Contrato {
            id,
            id_inquilino: self.id_inquilino,
            id_inmueble: self.id_inmueble,
            fecha_desde: self.fecha_desde,
            fecha_hasta: self.fecha_hasta,
            monto_mensual: self.monto_mensual,
        }
    }
}

/// Los selects del formulario necesitan inquilinos e inmuebles.
async fn contexto_con_lookups(state: &AppState, title: &str) -> Result<Context, AppError> {
    let inquilinos = db::inquilino::obtener_todos(&state.db_pool).await?;
    let inmuebles = db::inmueble::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("inquilinos", &inquilinos);
    context.insert("inmuebles", &inmuebles);
    Ok(context)
}

#[get("/contrato")]
pub async fn index(state: Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let lista = db::contrato::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", "Contratos");
    context.insert("contratos", &lista);
    flashes_al_contexto(&session, &mut context);
    render("contrato/index.html", &context)
}

#[get("/contrato/details/{id}")]
pub async fn details(state: Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let contrato = db::contrato::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Detalle de contrato");
    context.insert("contrato", &contrato);
    render("contrato/details.html", &context)
}

#[get("/contrato/create")]
pub async fn create(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let context = contexto_con_lookups(&state, "Nuevo contrato").await?;
    render("contrato/create.html", &context)
}

#[post("/contrato/create")]
pub async fn create_form(
    web::Form(form): web::Form<ContratoForm>,
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = contexto_con_lookups(&state, "Nuevo contrato").await?;
        context.insert("errores", &errores);
        context.insert("valores", &form);
        return render("contrato/create.html", &context);
    }

    let creado = db::contrato::alta(&state.db_pool, &form.a_entidad(0)).await?;
    dejar_flash(&session, FLASH_ID, &creado.id.to_string())?;
    Ok(redirigir("/contrato"))
}

#[get("/contrato/edit/{id}")]
pub async fn edit(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let contrato = db::contrato::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = contexto_con_lookups(&state, "Editar contrato").await?;
    context.insert("contrato", &contrato);
    flashes_al_contexto(&session, &mut context);
    render("contrato/edit.html", &context)
}

#[post("/contrato/edit/{id}")]
pub async fn edit_form(
    web::Form(form): web::Form<ContratoForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = contexto_con_lookups(&state, "Editar contrato").await?;
        context.insert("contrato", &form.a_entidad(*id));
        context.insert("errores", &errores);
        return render("contrato/edit.html", &context);
    }

    db::contrato::modificacion(&state.db_pool, &form.a_entidad(*id)).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Datos guardados correctamente")?;
    Ok(redirigir("/contrato"))
}

#[get("/contrato/delete/{id}")]
pub async fn delete(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let contrato = db::contrato::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Eliminar contrato");
    context.insert("contrato", &contrato);
    render("contrato/delete.html", &context)
}

#[post("/contrato/delete/{id}")]
pub async fn delete_form(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    db::contrato::baja(&state.db_pool, *id).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Eliminación realizada correctamente")?;
    Ok(redirigir("/contrato"))
}
