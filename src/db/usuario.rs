use sqlx::SqlitePool;

use crate::models::Usuario;

pub async fn obtener_todos(pool: &SqlitePool) -> Result<Vec<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn obtener_por_id(pool: &SqlitePool, id: i64) -> Result<Option<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Búsqueda para el login; el nombre de usuario es único por esquema.
pub async fn obtener_por_nombre(
    pool: &SqlitePool,
    nombre_usuario: &str,
) -> Result<Option<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE nombre_usuario = $1")
        .bind(nombre_usuario)
        .fetch_optional(pool)
        .await
}

pub async fn alta(pool: &SqlitePool, e: &Usuario) -> Result<Usuario, sqlx::Error> {
    let creado = sqlx::query_as::<_, Usuario>(
        "INSERT INTO usuarios (nombre_usuario, rol, clave) \
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&e.nombre_usuario)
    .bind(&e.rol)
    .bind(&e.clave)
    .fetch_one(pool)
    .await?;
    log::info!("Usuario created with id {}", creado.id);
    Ok(creado)
}

pub async fn modificacion(pool: &SqlitePool, e: &Usuario) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("UPDATE usuarios SET nombre_usuario = $1, rol = $2 WHERE id = $3")
        .bind(&e.nombre_usuario)
        .bind(&e.rol)
        .bind(e.id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Actualiza los datos y, si viene un hash, también la clave, en una
/// sola transacción.
pub async fn modificacion_con_clave(
    pool: &SqlitePool,
    e: &Usuario,
    hash: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let res = sqlx::query("UPDATE usuarios SET nombre_usuario = $1, rol = $2 WHERE id = $3")
        .bind(&e.nombre_usuario)
        .bind(&e.rol)
        .bind(e.id)
        .execute(&mut *tx)
        .await?;
    if let Some(hash) = hash {
        sqlx::query("UPDATE usuarios SET clave = $1 WHERE id = $2")
            .bind(hash)
            .bind(e.id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(res.rows_affected())
}

pub async fn cambiar_clave(pool: &SqlitePool, id: i64, hash: &str) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("UPDATE usuarios SET clave = $1 WHERE id = $2")
        .bind(hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn baja(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM usuarios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    log::info!("Usuario with id {} deleted", id);
    Ok(res.rows_affected())
}
