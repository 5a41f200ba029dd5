use sqlx::SqlitePool;

use crate::models::Propietario;

pub async fn obtener_todos(pool: &SqlitePool) -> Result<Vec<Propietario>, sqlx::Error> {
    sqlx::query_as::<_, Propietario>("SELECT * FROM propietarios ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn obtener_por_id(pool: &SqlitePool, id: i64) -> Result<Option<Propietario>, sqlx::Error> {
    sqlx::query_as::<_, Propietario>("SELECT * FROM propietarios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// El id del argumento se ignora; la fila devuelta trae el id generado.
pub async fn alta(pool: &SqlitePool, e: &Propietario) -> Result<Propietario, sqlx::Error> {
    let creado = sqlx::query_as::<_, Propietario>(
        "INSERT INTO propietarios (nombre, apellido, dni, telefono, email, clave) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(&e.nombre)
    .bind(&e.apellido)
    .bind(&e.dni)
    .bind(&e.telefono)
    .bind(&e.email)
    .bind(&e.clave)
    .fetch_one(pool)
    .await?;
    log::info!("Propietario created with id {}", creado.id);
    Ok(creado)
}

/// Sobrescribe los campos editables; la clave se cambia sólo por `cambiar_clave`.
pub async fn modificacion(pool: &SqlitePool, e: &Propietario) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE propietarios SET nombre = $1, apellido = $2, dni = $3, telefono = $4, \
         email = $5 WHERE id = $6",
    )
    .bind(&e.nombre)
    .bind(&e.apellido)
    .bind(&e.dni)
    .bind(&e.telefono)
    .bind(&e.email)
    .bind(e.id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn cambiar_clave(pool: &SqlitePool, id: i64, hash: &str) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("UPDATE propietarios SET clave = $1 WHERE id = $2")
        .bind(hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn baja(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM propietarios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    log::info!("Propietario with id {} deleted", id);
    Ok(res.rows_affected())
}
