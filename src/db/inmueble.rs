use sqlx::SqlitePool;

use crate::models::Inmueble;

pub async fn obtener_todos(pool: &SqlitePool) -> Result<Vec<Inmueble>, sqlx::Error> {
    sqlx::query_as::<_, Inmueble>("SELECT * FROM inmuebles ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn obtener_por_id(pool: &SqlitePool, id: i64) -> Result<Option<Inmueble>, sqlx::Error> {
    sqlx::query_as::<_, Inmueble>("SELECT * FROM inmuebles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn alta(pool: &SqlitePool, e: &Inmueble) -> Result<Inmueble, sqlx::Error> {
    let creado = sqlx::query_as::<_, Inmueble>(
        "INSERT INTO inmuebles (direccion, id_propietario, tipo, ambientes, estado) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&e.direccion)
    .bind(e.id_propietario)
    .bind(&e.tipo)
    .bind(e.ambientes)
    .bind(&e.estado)
    .fetch_one(pool)
    .await?;
    log::info!("Inmueble created with id {}", creado.id);
    Ok(creado)
}

pub async fn modificacion(pool: &SqlitePool, e: &Inmueble) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE inmuebles SET direccion = $1, id_propietario = $2, tipo = $3, \
         ambientes = $4, estado = $5 WHERE id = $6",
    )
    .bind(&e.direccion)
    .bind(e.id_propietario)
    .bind(&e.tipo)
    .bind(e.ambientes)
    .bind(&e.estado)
    .bind(e.id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn baja(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM inmuebles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    log::info!("Inmueble with id {} deleted", id);
    Ok(res.rows_affected())
}
