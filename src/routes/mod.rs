//! Handlers HTTP, un módulo por entidad más home y la API con token.
//!
//! Patrón común: listado → formulario → submit con redirect-after-post,
//! y un mensaje flash de un solo uso que viaja por la sesión entre la
//! acción de escritura y la página siguiente.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use tera::Context;

use crate::{errors::AppError, TEMPLATES};

pub mod api;
pub mod contrato;
pub mod home;
pub mod inmueble;
pub mod inquilino;
pub mod pago;
pub mod propietario;
pub mod usuario;

pub(crate) const FLASH_MENSAJE: &str = "flash_mensaje";
pub(crate) const FLASH_ERROR: &str = "flash_error";
pub(crate) const FLASH_ID: &str = "flash_id";

pub fn render(nombre: &str, context: &Context) -> Result<HttpResponse, AppError> {
    let rendered = TEMPLATES.render(nombre, context).map_err(|e| {
        log::error!("Failed to render template {}: {}", nombre, e);
        AppError::TemplateError(e)
    })?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered))
}

pub fn redirigir(destino: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header(("Location", destino.to_owned()))
        .finish()
}

/// Deja un mensaje de un solo uso para la próxima página renderizada.
pub fn dejar_flash(session: &Session, clave: &str, valor: &str) -> Result<(), AppError> {
    session
        .insert(clave, valor)
        .map_err(|e| AppError::SessionError(e.to_string()))
}

/// Consume el mensaje: la lectura lo elimina de la sesión.
pub fn tomar_flash(session: &Session, clave: &str) -> Option<String> {
    let valor = session.get::<String>(clave).ok().flatten();
    if valor.is_some() {
        session.remove(clave);
    }
    valor
}

/// Vuelca los flashes pendientes (mensaje, error, id) al contexto.
pub fn flashes_al_contexto(session: &Session, context: &mut Context) {
    if let Some(mensaje) = tomar_flash(session, FLASH_MENSAJE) {
        context.insert("mensaje", &mensaje);
    }
    if let Some(error) = tomar_flash(session, FLASH_ERROR) {
        context.insert("error", &error);
    }
    if let Some(id) = tomar_flash(session, FLASH_ID) {
        context.insert("nuevo_id", &id);
    }
}

/// Registra todos los servicios de la aplicación; compartido por el
/// binario y los tests de handlers.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.service(home::index_handler)
        .service(home::ruta_handler)
        .service(home::ruta_default_handler)
        .service(home::fecha_handler)
        .service(home::restringido_handler)
        .service(usuario::login_handler)
        .service(usuario::login_form_handler)
        .service(usuario::logout_handler)
        .service(usuario::index)
        .service(usuario::details)
        .service(usuario::create)
        .service(usuario::create_form)
        .service(usuario::edit)
        .service(usuario::edit_form)
        .service(usuario::delete)
        .service(usuario::delete_form)
        .service(propietario::index)
        .service(propietario::details)
        .service(propietario::create)
        .service(propietario::create_form)
        .service(propietario::edit)
        .service(propietario::edit_form)
        .service(propietario::delete)
        .service(propietario::delete_form)
        .service(propietario::cambiar_pass)
        .service(inquilino::index)
        .service(inquilino::details)
        .service(inquilino::create)
        .service(inquilino::create_form)
        .service(inquilino::edit)
        .service(inquilino::edit_form)
        .service(inquilino::delete)
        .service(inquilino::delete_form)
        .service(inmueble::index)
        .service(inmueble::details)
        .service(inmueble::create)
        .service(inmueble::create_form)
        .service(inmueble::edit)
        .service(inmueble::edit_form)
        .service(inmueble::delete)
        .service(inmueble::delete_form)
        .service(contrato::index)
        .service(contrato::details)
        .service(contrato::create)
        .service(contrato::create_form)
        .service(contrato::edit)
        .service(contrato::edit_form)
        .service(contrato::delete)
        .service(contrato::delete_form)
        .service(pago::index)
        .service(pago::details)
        .service(pago::create)
        .service(pago::create_form)
        .service(pago::edit)
        .service(pago::edit_form)
        .service(pago::delete)
        .service(pago::delete_form)
        .service(api::login_token)
        .service(api::inmuebles)
        .service(api::contratos);
}
