use actix_identity::Identity;
use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use tera::Context;

use crate::{
    auth, db,
    errors::AppError,
    models::Inmueble,
    routes::{dejar_flash, flashes_al_contexto, redirigir, render, FLASH_ID, FLASH_MENSAJE},
    AppState,
};

#[derive(Deserialize, Serialize)]
pub struct InmuebleForm {
    pub direccion: String,
    pub id_propietario: i64,
    pub tipo: String,
    pub ambientes: i64,
    pub estado: String,
}

impl InmuebleForm {
    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        if self.direccion.trim().is_empty() {
            errores.push("La dirección es obligatoria".to_owned());
        }
        if self.tipo.trim().is_empty() {
            errores.push("El tipo es obligatorio".to_owned());
        }
        if self.ambientes < 1 {
            errores.push("Los ambientes deben ser al menos 1".to_owned());
        }
        if self.estado.trim().is_empty() {
            errores.push("El estado es obligatorio".to_owned());
        }
        errores
    }

    fn a_entidad(self, id: i64) -> Inmueble {
        Inmueble {
            id,
            direccion: self.direccion,
            id_propietario: self.id_propietario,
            tipo: self.tipo,
            ambientes: self.ambientes,
            estado: self.estado,
        }
    }
}

/// El formulario necesita la lista de propietarios para el select de dueño.
async fn contexto_con_propietarios(
    state: &AppState,
    title: &str,
) -> Result<Context, AppError> {
    let propietarios = db::propietario::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("propietarios", &propietarios);
    Ok(context)
}

#[get("/inmueble")]
pub async fn index(state: Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let lista = db::inmueble::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", "Inmuebles");
    context.insert("inmuebles", &lista);
    flashes_al_contexto(&session, &mut context);
    render("inmueble/index.html", &context)
}

#[get("/inmueble/details/{id}")]
pub async fn details(state: Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let inmueble = db::inmueble::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Detalle de inmueble");
    context.insert("inmueble", &inmueble);
    render("inmueble/details.html", &context)
}

#[get("/inmueble/create")]
pub async fn create(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let context = contexto_con_propietarios(&state, "Nuevo inmueble").await?;
    render("inmueble/create.html", &context)
}

#[post("/inmueble/create")]
pub async fn create_form(
    web::Form(form): web::Form<InmuebleForm>,
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = contexto_con_propietarios(&state, "Nuevo inmueble").await?;
        context.insert("errores", &errores);
        context.insert("valores", &form);
        return render("inmueble/create.html", &context);
    }

    let creado = db::inmueble::alta(&state.db_pool, &form.a_entidad(0)).await?;
    dejar_flash(&session, FLASH_ID, &creado.id.to_string())?;
    Ok(redirigir("/inmueble"))
}

#[get("/inmueble/edit/{id}")]
pub async fn edit(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let inmueble = db::inmueble::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = contexto_con_propietarios(&state, "Editar inmueble").await?;
    context.insert("inmueble", &inmueble);
    flashes_al_contexto(&session, &mut context);
    render("inmueble/edit.html", &context)
}

#[post("/inmueble/edit/{id}")]
pub async fn edit_form(
    web::Form(form): web::Form<InmuebleForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = contexto_con_propietarios(&state, "Editar inmueble").await?;
        context.insert("inmueble", &form.a_entidad(*id));
        context.insert("errores", &errores);
        return render("inmueble/edit.html", &context);
    }

    db::inmueble::modificacion(&state.db_pool, &form.a_entidad(*id)).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Datos guardados correctamente")?;
    Ok(redirigir("/inmueble"))
}

#[get("/inmueble/delete/{id}")]
pub async fn delete(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let inmueble = db::inmueble::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Eliminar inmueble");
    context.insert("inmueble", &inmueble);
    render("inmueble/delete.html", &context)
}

#[post("/inmueble/delete/{id}")]
pub async fn delete_form(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    db::inmueble::baja(&state.db_pool, *id).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Eliminación realizada correctamente")?;
    Ok(redirigir("/inmueble"))
}
