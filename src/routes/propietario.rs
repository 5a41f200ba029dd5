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
    models::Propietario,
    passwords,
    routes::{dejar_flash, flashes_al_contexto, redirigir, render, FLASH_ERROR, FLASH_ID, FLASH_MENSAJE},
    AppState,
};

#[derive(Deserialize, Serialize)]
pub struct PropietarioForm {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub telefono: String,
    pub email: String,
    pub clave: String,
}

#[derive(Deserialize, Serialize)]
pub struct PropietarioEditForm {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub telefono: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CambioClaveForm {
    pub clave_vieja: String,
    pub clave_nueva: String,
    pub clave_repetida: String,
}

fn validar_datos(nombre: &str, apellido: &str, dni: &str, email: &str) -> Vec<String> {
    let mut errores = Vec::new();
    if nombre.trim().is_empty() {
        errores.push("El nombre es obligatorio".to_owned());
    }
    if apellido.trim().is_empty() {
        errores.push("El apellido es obligatorio".to_owned());
    }
    if dni.trim().is_empty() {
        errores.push("El DNI es obligatorio".to_owned());
    }
    if !email.contains('@') {
        errores.push("El email no es válido".to_owned());
    }
    errores
}

#[get("/propietario")]
pub async fn index(state: Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
    let lista = db::propietario::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", "Propietarios");
    context.insert("propietarios", &lista);
    flashes_al_contexto(&session, &mut context);
    render("propietario/index.html", &context)
}

#[get("/propietario/details/{id}")]
pub async fn details(state: Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let propietario = db::propietario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Detalle de propietario");
    context.insert("propietario", &propietario);
    render("propietario/details.html", &context)
}

#[get("/propietario/create")]
pub async fn create(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let mut context = Context::new();
    context.insert("title", "Nuevo propietario");
    render("propietario/create.html", &context)
}

#[post("/propietario/create")]
pub async fn create_form(
    web::Form(form): web::Form<PropietarioForm>,
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    let mut errores = validar_datos(&form.nombre, &form.apellido, &form.dni, &form.email);
    if form.clave.len() < 6 {
        errores.push("La clave debe tener al menos 6 caracteres".to_owned());
    }
    if !errores.is_empty() {
        let mut context = Context::new();
        context.insert("title", "Nuevo propietario");
        context.insert("errores", &errores);
        context.insert("valores", &form);
        return render("propietario/create.html", &context);
    }

    let propietario = Propietario {
        id: 0,
        nombre: form.nombre,
        apellido: form.apellido,
        dni: form.dni,
        telefono: form.telefono,
        email: form.email,
        clave: passwords::hash_clave(&form.clave)?,
    };
    let creado = db::propietario::alta(&state.db_pool, &propietario).await?;
    dejar_flash(&session, FLASH_ID, &creado.id.to_string())?;
    Ok(redirigir("/propietario"))
}

#[get("/propietario/edit/{id}")]
pub async fn edit(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let propietario = db::propietario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Editar propietario");
    context.insert("propietario", &propietario);
    flashes_al_contexto(&session, &mut context);
    render("propietario/edit.html", &context)
}

#[post("/propietario/edit/{id}")]
pub async fn edit_form(
    web::Form(form): web::Form<PropietarioEditForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;

    // La clave no se toca acá; sólo por cambiar_pass.
    let propietario = Propietario {
        id: *id,
        nombre: form.nombre,
        apellido: form.apellido,
        dni: form.dni,
        telefono: form.telefono,
        email: form.email,
        clave: String::new(),
    };

    let errores = validar_datos(
        &propietario.nombre,
        &propietario.apellido,
        &propietario.dni,
        &propietario.email,
    );
    if !errores.is_empty() {
        // Se vuelve a mostrar lo ingresado, no la fila guardada.
        let mut context = Context::new();
        context.insert("title", "Editar propietario");
        context.insert("propietario", &propietario);
        context.insert("errores", &errores);
        return render("propietario/edit.html", &context);
    }

    db::propietario::modificacion(&state.db_pool, &propietario).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Datos guardados correctamente")?;
    Ok(redirigir("/propietario"))
}

#[get("/propietario/delete/{id}")]
pub async fn delete(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let propietario = db::propietario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Eliminar propietario");
    context.insert("propietario", &propietario);
    render("propietario/delete.html", &context)
}

#[post("/propietario/delete/{id}")]
pub async fn delete_form(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    db::propietario::baja(&state.db_pool, *id).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Eliminación realizada correctamente")?;
    Ok(redirigir("/propietario"))
}

/// Cambio de clave del propietario. Comparte la vista con Edit: ante
/// cualquier rechazo se vuelve allí con el error como flash.
#[post("/propietario/cambiarpass/{id}")]
pub async fn cambiar_pass(
    web::Form(form): web::Form<CambioClaveForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    auth::usuario_actual(&state.db_pool, identity).await?;
    let propietario = db::propietario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !passwords::verificar_clave(&form.clave_vieja, &propietario.clave) {
        log::warn!(
            "Old password verification failed for propietario {}",
            propietario.id
        );
        dejar_flash(&session, FLASH_ERROR, "Clave incorrecta")?;
        return Ok(redirigir(&format!("/propietario/edit/{}", *id)));
    }

    let mut errores = Vec::new();
    if form.clave_nueva.len() < 6 {
        errores.push("La clave nueva debe tener al menos 6 caracteres");
    }
    if form.clave_nueva != form.clave_repetida {
        errores.push("Las claves no coinciden");
    }
    if let Some(error) = errores.first() {
        dejar_flash(&session, FLASH_ERROR, error)?;
        return Ok(redirigir(&format!("/propietario/edit/{}", *id)));
    }

    let hash = passwords::hash_clave(&form.clave_nueva)?;
    db::propietario::cambiar_clave(&state.db_pool, *id, &hash).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Contraseña actualizada correctamente")?;
    Ok(redirigir("/propietario"))
}
