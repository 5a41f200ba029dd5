use sqlx::SqlitePool;

use crate::models::Inquilino;

pub async fn obtener_todos(pool: &SqlitePool) -> Result<Vec<Inquilino>, sqlx::Error> {
    sqlx::query_as::<_, Inquilino>("SELECT * FROM inquilinos ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn obtener_por_id(pool: &SqlitePool, id: i64) -> Result<Option<Inquilino>, sqlx::Error> {
    sqlx::query_as::<_, Inquilino>("SELECT * FROM inquilinos WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn alta(pool: &SqlitePool, e: &Inquilino) -> Result<Inquilino, sqlx::Error> {
    let creado = sqlx::query_as::<_, Inquilino>(
        "INSERT INTO inquilinos (nombre, apellido, dni, telefono, direccion, email, \
         lugar_trabajo, nombre_garante, apellido_garante, dni_garante, telefono_garante, \
         direccion_garante) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
    )
    .bind(&e.nombre)
    .bind(&e.apellido)
    .bind(&e.dni)
    .bind(&e.telefono)
    .bind(&e.direccion)
    .bind(&e.email)
    .bind(&e.lugar_trabajo)
    .bind(&e.nombre_garante)
    .bind(&e.apellido_garante)
    .bind(&e.dni_garante)
    .bind(&e.telefono_garante)
    .bind(&e.direccion_garante)
    .fetch_one(pool)
    .await?;
    log::info!("Inquilino created with id {}", creado.id);
    Ok(creado)
}

pub async fn modificacion(pool: &SqlitePool, e: &Inquilino) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE inquilinos SET nombre = $1, apellido = $2, dni = $3, telefono = $4, \
         direccion = $5, email = $6, lugar_trabajo = $7, nombre_garante = $8, \
         apellido_garante = $9, dni_garante = $10, telefono_garante = $11, \
         direccion_garante = $12 WHERE id = $13",
    )
    .bind(&e.nombre)
    .bind(&e.apellido)
    .bind(&e.dni)
    .bind(&e.telefono)
    .bind(&e.direccion)
    .bind(&e.email)
    .bind(&e.lugar_trabajo)
    .bind(&e.nombre_garante)
    .bind(&e.apellido_garante)
    .bind(&e.dni_garante)
    .bind(&e.telefono_garante)
    .bind(&e.direccion_garante)
    .bind(e.id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn baja(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM inquilinos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    log::info!("Inquilino with id {} deleted", id);
    Ok(res.rows_affected())
}
