use actix_identity::Identity;
use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpMessage, HttpRequest, HttpResponse,
};
use serde::{Deserialize, Serialize};
use tera::Context;

use crate::{
    auth, db,
    errors::AppError,
    models::{Rol, Usuario},
    passwords,
    routes::{dejar_flash, flashes_al_contexto, redirigir, render, FLASH_ID, FLASH_MENSAJE},
    AppState,
};

#[derive(Deserialize)]
pub struct LoginForm {
    pub nombre_usuario: String,
    pub clave: String,
}

#[derive(Deserialize, Serialize)]
pub struct UsuarioForm {
    pub nombre_usuario: String,
    pub rol: Rol,
    pub clave: String,
}

#[derive(Deserialize, Serialize)]
pub struct UsuarioEditForm {
    pub nombre_usuario: String,
    pub rol: Rol,
    /// Vacía = no cambiar la clave.
    #[serde(default)]
    pub clave: String,
}

#[get("/login")]
pub async fn login_handler() -> Result<HttpResponse, AppError> {
    let mut context = Context::new();
    context.insert("title", "Ingresar");
    render("login.html", &context)
}

#[post("/login")]
pub async fn login_form_handler(
    web::Form(form): web::Form<LoginForm>,
    state: Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let usuario = db::usuario::obtener_por_nombre(&state.db_pool, &form.nombre_usuario).await?;

    match usuario {
        Some(usuario) if passwords::verificar_clave(&form.clave, &usuario.clave) => {
            Identity::login(&request.extensions(), usuario.id.to_string())
                .map_err(|e| AppError::SessionError(e.to_string()))?;
            log::info!("Usuario {} logged in", usuario.nombre_usuario);
            Ok(redirigir("/"))
        }
        _ => {
            let mut context = Context::new();
            context.insert("title", "Ingresar");
            context.insert("error", "Usuario o clave incorrectos");
            render("login.html", &context)
        }
    }
}

#[post("/logout")]
pub async fn logout_handler(identity: Option<Identity>) -> HttpResponse {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirigir("/login")
}

#[get("/usuario")]
pub async fn index(
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;
    let lista = db::usuario::obtener_todos(&state.db_pool).await?;
    let mut context = Context::new();
    context.insert("title", "Usuarios");
    context.insert("usuarios", &lista);
    flashes_al_contexto(&session, &mut context);
    render("usuario/index.html", &context)
}

#[get("/usuario/details/{id}")]
pub async fn details(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;
    let usuario = db::usuario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Detalle de usuario");
    context.insert("usuario", &usuario);
    render("usuario/details.html", &context)
}

#[get("/usuario/create")]
pub async fn create(
    state: Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;
    let mut context = Context::new();
    context.insert("title", "Nuevo usuario");
    render("usuario/create.html", &context)
}

#[post("/usuario/create")]
pub async fn create_form(
    web::Form(form): web::Form<UsuarioForm>,
    state: Data<AppState>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;

    let mut errores = Vec::new();
    if form.nombre_usuario.trim().is_empty() {
        errores.push("El nombre de usuario es obligatorio".to_owned());
    }
    if form.clave.len() < 6 {
        errores.push("La clave debe tener al menos 6 caracteres".to_owned());
    }
    if !errores.is_empty() {
        let mut context = Context::new();
        context.insert("title", "Nuevo usuario");
        context.insert("errores", &errores);
        context.insert("valores", &form);
        return render("usuario/create.html", &context);
    }

    let usuario = Usuario {
        id: 0,
        nombre_usuario: form.nombre_usuario,
        rol: form.rol,
        clave: passwords::hash_clave(&form.clave)?,
    };
    let creado = db::usuario::alta(&state.db_pool, &usuario).await?;
    dejar_flash(&session, FLASH_ID, &creado.id.to_string())?;
    Ok(redirigir("/usuario"))
}

#[get("/usuario/edit/{id}")]
pub async fn edit(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;
    let usuario = db::usuario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Editar usuario");
    context.insert("usuario", &usuario);
    flashes_al_contexto(&session, &mut context);
    render("usuario/edit.html", &context)
}

#[post("/usuario/edit/{id}")]
pub async fn edit_form(
    web::Form(form): web::Form<UsuarioEditForm>,
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;

    let usuario = Usuario {
        id: *id,
        nombre_usuario: form.nombre_usuario,
        rol: form.rol,
        clave: String::new(),
    };

    if usuario.nombre_usuario.trim().is_empty() {
        // Se vuelve a mostrar lo ingresado, no la fila guardada.
        let mut context = Context::new();
        context.insert("title", "Editar usuario");
        context.insert("usuario", &usuario);
        context.insert("errores", &["El nombre de usuario es obligatorio"]);
        return render("usuario/edit.html", &context);
    }

    let hash = if form.clave.is_empty() {
        None
    } else {
        Some(passwords::hash_clave(&form.clave)?)
    };
    db::usuario::modificacion_con_clave(&state.db_pool, &usuario, hash.as_deref()).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Datos guardados correctamente")?;
    Ok(redirigir("/usuario"))
}

#[get("/usuario/delete/{id}")]
pub async fn delete(
    state: Data<AppState>,
    id: web::Path<i64>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;
    let usuario = db::usuario::obtener_por_id(&state.db_pool, *id)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut context = Context::new();
    context.insert("title", "Eliminar usuario");
    context.insert("usuario", &usuario);
    render("usuario/delete.html", &context)
}

#[post("/usuario/delete/{id}")]
pub async fn delete_form(
    state: Data<AppState>,
    id: web::Path<i64>,
    session: Session,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let actual = auth::usuario_actual(&state.db_pool, identity).await?;
    auth::exigir_administrador(&actual)?;
    db::usuario::baja(&state.db_pool, *id).await?;
    dejar_flash(&session, FLASH_MENSAJE, "Eliminación realizada correctamente")?;
    Ok(redirigir("/usuario"))
}
