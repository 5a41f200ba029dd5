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
    models::Inquilino,
    routes::{dejar_flash, flashes_al_contexto, redirigir, render, FLASH_ID, FLASH_MENSAJE},
    AppState,
};

/// Todos los campos del inquilino son obligatorios, incluidos los del garante.
#[derive(Deserialize, Serialize)]
pub struct InquilinoForm {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub telefono: String,
    pub direccion: String,
    pub email: String,
    pub lugar_trabajo: String,
    pub nombre_garante: String,
    pub apellido_garante: String,
    pub dni_garante: String,
    pub telefono_garante: String,
    pub direccion_garante: String,
}

impl InquilinoForm {
    fn validar(&self) -> Vec<String> {
        let obligatorios = [
            ("nombre", &self.nombre),
            ("apellido", &self.apellido),
            ("DNI", &self.dni),
            ("teléfono", &self.telefono),
            ("dirección", &self.direccion),
            ("email", &self.email),
            ("lugar de trabajo", &self.lugar_trabajo),
            ("nombre del garante", &self.nombre_garante),
            ("apellido del garante", &self.apellido_garante),
            ("DNI del garante", &self.dni_garante),
            ("teléfono del garante", &self.telefono_garante),
            ("dirección del garante", &self.direccion_garante),
        ];
        let mut errores: Vec<String> = obligatorios
            .iter()
            .filter(|(_, valor)| valor.trim().is_empty())
            .map(|(campo, _)| format!("El campo {} es obligatorio", campo))
            .collect();
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errores.push("El email no es válido".to_owned());
        }
        errores
    }

    fn a_entidad(self, id: i64) -> Inquilino {
        Inquilino {
            id,
            nombre: self.nombre,
            apellido: self.apellido,
            dni: self.dni,
            telefono: self.telefono,
            direccion: self.direccion,
            email: self.email,
            lugar_trabajo: self.lugar_trabajo,
            nombre_garante: self.nombre_garante,
            apellido_garante: self.apellido_garante,
            dni_garante: self.dni_garante,
            telefono_garante: self.telefono_garante,
            direccion_garante: self.direccion_garante,
        }
    }
}

#[get("/inquilino")]
pub async fn index(state: Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let lista = db::inquilino::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", "Inquilinos");
    context.insert("inquilinos", &lista);
    flashes_al_contexto(&session, &mut context);
    render("inquilino/index.html", &context)
}

#[get("/inquilino/details/{id}")]
pub async fn details(state: Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let inquilino = db::inquilino::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Detalle de inquilino");
    context.insert("inquilino", &inquilino);
    render("inquilino/details.html", &context)
}

#[get("/inquilino/create")]
pub async fn create(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let mut context = Context::new();
    context.insert("title", "Nuevo inquilino");
    render("inquilino/create.html", &context)
}

#[post("/inquilino/create")]
pub async fn create_form(
    web::Form(form): web::Form<InquilinoForm>,
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = Context::new();
        context.insert("title", "Nuevo inquilino");
        context.insert("errores", &errores);
        context.insert("valores", &form);
        return render("inquilino/create.html", &context);
    }

    let creado = db::inquilino::alta(&state.db_pool, &form.a_entidad(0)).await?;
    dejar_flash(&session, FLASH_ID, &creado.id.to_string())?;
    Ok(redirigir("/inquilino"))
}

#[get("/inquilino/edit/{id}")]
pub async fn edit(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let inquilino = db::inquilino::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Editar inquilino");
    context.insert("inquilino", &inquilino);
    flashes_al_contexto(&session, &mut context);
    render("inquilino/edit.html", &context)
}

#[post("/inquilino/edit/{id}")]
pub async fn edit_form(
    web::Form(form): web::Form<InquilinoForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let errores = form.validar();
    if !errores.is_empty() {
        let mut context = Context::new();
        context.insert("title", "Editar inquilino");
        context.insert("inquilino", &form.a_entidad(*id));
        context.insert("errores", &errores);
        return render("inquilino/edit.html", &context);
    }

    db::inquilino::modificacion(&state.db_pool, &form.a_entidad(*id)).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Datos guardados correctamente")?;
    Ok(redirigir("/inquilino"))
}

#[get("/inquilino/delete/{id}")]
pub async fn delete(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let inquilino = db::inquilino::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Eliminar inquilino");
    context.insert("inquilino", &inquilino);
    render("inquilino/delete.html", &context)
}

#[post("/inquilino/delete/{id}")]
pub async fn delete_form(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    db::inquilino::baja(&state.db_pool, *id).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Eliminación realizada correctamente")?;
    Ok(redirigir("/inquilino"))
}
