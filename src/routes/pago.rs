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
    models::Pago,
    routes::{dejar_flash, flashes_al_contexto, redirigir, render, FLASH_ID, FLASH_MENSAJE},
    AppState,
};

#[derive(Deserialize, Serialize)]
pub struct PagoForm {
    pub id_contrato: i64,
    pub fecha: NaiveDate,
    pub importe: f64,
    pub concepto: String,
}

impl PagoForm {
    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        if self.importe <= 0.0 {
            errores.push("El importe debe ser mayor a cero".to_owned());
        }
        if self.concepto.trim().is_empty() {
            errores.push("El concepto es obligatorio".to_owned());
        }
        errores
    }

    fn a_entidad(&self, id: i64) -> Pago {
        Pago {
            id,
            id_contrato: self.id_contrato,
            fecha: self.fecha,
            importe: self.importe,
            concepto: self.concepto.clone(),
        }
    }
}

async fn contexto_con_contratos(state: &AppState, title: &str) -> Result<Context, AppError> {
    let contratos = db::contrato::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("contratos", &contratos);
    Ok(context)
}

#[get("/pago")]
pub async fn index(state: Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let lista = db::pago::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", "Pagos");
    context.insert("pagos", &lista);
    flashes_al_contexto(&session, &mut context);
    render("pago/index.html", &context)
}

#[get("/pago/details/{id}")]
pub async fn details(state: Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let pago = db::pago::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Detalle de pago");
    context.insert("pago", &pago);
    render("pago/details.html", &context)
}

#[get("/pago/create")]
pub async fn create(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let context = contexto_con_contratos(&state, "Nuevo pago").await?;
    render("pago/create.html", &context)
}

#[post("/pago/create")]
pub async fn create_form(
    web::Form(form): web::Form<PagoForm>,
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = contexto_con_contratos(&state, "Nuevo pago").await?;
        context.insert("errores", &errores);
        context.insert("valores", &form);
        return render("pago/create.html", &context);
    }

    let creado = db::pago::alta(&state.db_pool, &form.a_entidad(0)).await?;
    dejar_flash(&session, FLASH_ID, &creado.id.to_string())?;
    Ok(redirigir("/pago"))
}

#[get("/pago/edit/{id}")]
pub async fn edit(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let pago = db::pago::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = contexto_con_contratos(&state, "Editar pago").await?;
    context.insert("pago", &pago);
    flashes_al_contexto(&session, &mut context);
    render("pago/edit.html", &context)
}

#[post("/pago/edit/{id}")]
pub async fn edit_form(
    web::Form(form): web::Form<PagoForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = contexto_con_contratos(&state, "Editar pago").await?;
        context.insert("pago", &form.a_entidad(*id));
        context.insert("errores", &errores);
        return render("pago/edit.html", &context);
    }

    db::pago::modificacion(&state.db_pool, &form.a_entidad(*id)).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Datos guardados correctamente")?;
    Ok(redirigir("/pago"))
}

#[get("/pago/delete/{id}")]
pub async fn delete(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let pago = db::pago::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Eliminar pago");
    context.insert("pago", &pago);
    render("pago/delete.html", &context)
}

#[post("/pago/delete/{id}")]
pub async fn delete_form(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    db::pago::baja(&state.db_pool, *id).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Eliminación realizada correctamente")?;
    Ok(redirigir("/pago"))
}
