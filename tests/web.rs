mod common;

use actix_identity::IdentityMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::{Cookie, Key},
    http::{header, StatusCode},
    test,
    web::Data,
    App,
};

use common::{crear_admin, crear_empleado, estado, propietario_ana};
use inmobiliaria::{db, passwords, routes};

macro_rules! app {
    ($estado:expr) => {
        test::init_service(
            App::new()
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(
                        CookieSessionStore::default(),
                        Key::from($estado.config.session_key.as_bytes()),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(Data::new($estado.clone()))
                .configure(routes::configurar),
        )
        .await
    };
}

fn cookies_de<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Vec<Cookie<'static>> {
    resp.response()
        .cookies()
        .map(|c| c.into_owned())
        .collect()
}

fn con_cookies(req: test::TestRequest, cookies: &[Cookie<'static>]) -> test::TestRequest {
    cookies.iter().fold(req, |req, c| req.cookie(c.clone()))
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[actix_web::test]
async fn el_listado_es_publico_y_responde_con_tabla_vacia() {
    let estado = estado().await;
    let app = app!(estado);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/propietario").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn una_mutacion_anonima_redirige_al_login() {
    let estado = estado().await;
    let app = app!(estado);

    let req = test::TestRequest::post()
        .uri("/propietario/create")
        .set_form(&[
            ("nombre", "Ana"),
            ("apellido", "Diaz"),
            ("dni", "12345678"),
            ("telefono", "555-0001"),
            ("email", "ana@example.com"),
            ("clave", "secret1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn alta_de_propietario_con_sesion_redirige_al_listado_con_flash() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let sesion = cookies_de(&resp);
    assert!(!sesion.is_empty(), "login should set a session cookie");

    let req = con_cookies(test::TestRequest::post().uri("/propietario/create"), &sesion)
        .set_form(&[
            ("nombre", "Ana"),
            ("apellido", "Diaz"),
            ("dni", "12345678"),
            ("telefono", "555-0001"),
            ("email", "ana@example.com"),
            ("clave", "secret1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/propietario");

    // El flash viaja en la sesión actualizada por el POST.
    let sesion = cookies_de(&resp);
    let req = con_cookies(test::TestRequest::get().uri("/propietario"), &sesion).to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Alta realizada con id"));

    let lista = db::propietario::obtener_todos(&estado.db_pool).await.unwrap();
    assert_eq!(lista.len(), 1);
    assert_ne!(lista[0].clave, "secret1");
}

#[actix_web::test]
async fn editar_sobre_id_inexistente_devuelve_404() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    let sesion = cookies_de(&resp);

    let req = con_cookies(
        test::TestRequest::get().uri("/propietario/edit/9999"),
        &sesion,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn un_empleado_no_accede_a_la_gestion_de_usuarios() {
    let estado = estado().await;
    crear_empleado(&estado.db_pool, "secreto1").await;
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "empleado"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let sesion = cookies_de(&resp);

    let req = con_cookies(test::TestRequest::get().uri("/usuario"), &sesion).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/restringido");
}

#[actix_web::test]
async fn editar_propietario_invalido_conserva_lo_ingresado() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let hash = passwords::hash_clave("secret1").unwrap();
    let propietario = db::propietario::alta(&estado.db_pool, &propietario_ana(&hash))
        .await
        .unwrap();
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    let sesion = cookies_de(&resp);

    let req = con_cookies(
        test::TestRequest::post().uri(&format!("/propietario/edit/{}", propietario.id)),
        &sesion,
    )
    .set_form(&[
        ("nombre", ""),
        ("apellido", "Diaz"),
        ("dni", "12345678"),
        ("telefono", "555-7777"),
        ("email", "ana@example.com"),
    ])
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("El nombre es obligatorio"));
    // El formulario vuelve con lo tipeado, no con la fila guardada.
    assert!(html.contains("555-7777"));

    let leido = db::propietario::obtener_por_id(&estado.db_pool, propietario.id)
        .await
        .unwrap()
        .expect("existe");
    assert_eq!(leido.telefono, "555-0001");
}

#[actix_web::test]
async fn editar_usuario_invalido_no_pisa_la_fila_guardada() {
    let estado = estado().await;
    let admin = crear_admin(&estado.db_pool, "secreto1").await;
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    let sesion = cookies_de(&resp);

    let req = con_cookies(
        test::TestRequest::post().uri(&format!("/usuario/edit/{}", admin.id)),
        &sesion,
    )
    .set_form(&[
        ("nombre_usuario", ""),
        ("rol", "Empleado"),
        ("clave", ""),
    ])
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("El nombre de usuario es obligatorio"));

    let leido = db::usuario::obtener_por_id(&estado.db_pool, admin.id)
        .await
        .unwrap()
        .expect("existe");
    assert_eq!(leido.nombre_usuario, "admin");
}

#[actix_web::test]
async fn logout_anonimo_redirige_al_login() {
    let estado = estado().await;
    let app = app!(estado);

    let resp = test::call_service(&app, test::TestRequest::post().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn ruteo_sin_valor_usa_el_defecto() {
    let estado = estado().await;
    let app = app!(estado);

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/ruteo").to_request()).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("defecto"));
}

#[actix_web::test]
async fn cambiar_pass_con_clave_vieja_incorrecta_no_toca_el_hash() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let hash = passwords::hash_clave("secret1").unwrap();
    let propietario = db::propietario::alta(&estado.db_pool, &propietario_ana(&hash))
        .await
        .unwrap();
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    let sesion = cookies_de(&resp);

    let req = con_cookies(
        test::TestRequest::post().uri(&format!("/propietario/cambiarpass/{}", propietario.id)),
        &sesion,
    )
    .set_form(&[
        ("clave_vieja", "equivocada"),
        ("clave_nueva", "nueva123"),
        ("clave_repetida", "nueva123"),
    ])
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/propietario/edit/{}", propietario.id)
    );

    let leido = db::propietario::obtener_por_id(&estado.db_pool, propietario.id)
        .await
        .unwrap()
        .expect("existe");
    assert_eq!(leido.clave, hash);
    assert!(passwords::verificar_clave("secret1", &leido.clave));
}

#[actix_web::test]
async fn cambiar_pass_con_clave_vieja_correcta_persiste_el_hash_nuevo() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let hash = passwords::hash_clave("secret1").unwrap();
    let propietario = db::propietario::alta(&estado.db_pool, &propietario_ana(&hash))
        .await
        .unwrap();
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    let sesion = cookies_de(&resp);

    let req = con_cookies(
        test::TestRequest::post().uri(&format!("/propietario/cambiarpass/{}", propietario.id)),
        &sesion,
    )
    .set_form(&[
        ("clave_vieja", "secret1"),
        ("clave_nueva", "nueva123"),
        ("clave_repetida", "nueva123"),
    ])
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/propietario");

    let leido = db::propietario::obtener_por_id(&estado.db_pool, propietario.id)
        .await
        .unwrap()
        .expect("existe");
    assert!(passwords::verificar_clave("nueva123", &leido.clave));
    assert!(!passwords::verificar_clave("secret1", &leido.clave));
}

#[actix_web::test]
async fn un_contrato_con_fechas_invertidas_no_se_persiste() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&[("nombre_usuario", "admin"), ("clave", "secreto1")])
            .to_request(),
    )
    .await;
    let sesion = cookies_de(&resp);

    let req = con_cookies(test::TestRequest::post().uri("/contrato/create"), &sesion)
        .set_form(&[
            ("id_inquilino", "1"),
            ("id_inmueble", "1"),
            ("fecha_desde", "2026-03-01"),
            ("fecha_hasta", "2024-03-01"),
            ("monto_mensual", "250000"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    // El formulario se vuelve a renderizar con el error, sin redirect.
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(db::contrato::obtener_todos(&estado.db_pool)
        .await
        .unwrap()
        .is_empty());
}

#[actix_web::test]
async fn la_api_exige_un_bearer_valido() {
    let estado = estado().await;
    crear_admin(&estado.db_pool, "secreto1").await;
    let app = app!(estado);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/inmuebles").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cuerpo: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({
                "nombre_usuario": "admin",
                "clave": "secreto1",
            }))
            .to_request(),
    )
    .await;
    let token = cuerpo["token"].as_str().expect("token emitido");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/inmuebles")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}
