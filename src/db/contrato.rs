use sqlx::SqlitePool;

use crate::models::Contrato;

pub async fn obtener_todos(pool: &SqlitePool) -> Result<Vec<Contrato>, sqlx::Error> {
    sqlx::query_as::<_, Contrato>("SELECT * FROM contratos ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn obtener_por_id(pool: &SqlitePool, id: i64) -> Result<Option<Contrato>, sqlx::Error> {
    sqlx::query_as::<_, Contrato>("SELECT * FROM contratos WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn alta(pool: &SqlitePool, e: &Contrato) -> Result<Contrato, sqlx::Error> {
    let creado = sqlx::query_as::<_, Contrato>(
        "INSERT INTO contratos (id_inquilino, id_inmueble, fecha_desde, fecha_hasta, \
         monto_mensual) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(e.id_inquilino)
    .bind(e.id_inmueble)
    .bind(e.fecha_desde)
    .bind(e.fecha_hasta)
    .bind(e.monto_mensual)
    .fetch_one(pool)
    .await?;
    log::info!("Contrato created with id {}", creado.id);
    Ok(creado)
}

pub async fn modificacion(pool: &SqlitePool, e: &Contrato) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE contratos SET id_inquilino = $1, id_inmueble = $2, fecha_desde = $3, \
         fecha_hasta = $4, monto_mensual = $5 WHERE id = $6",
    )
    .bind(e.id_inquilino)
    .bind(e.id_inmueble)
    .bind(e.fecha_desde)
    .bind(e.fecha_hasta)
    .bind(e.monto_mensual)
    .bind(e.id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn baja(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM contratos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    log::info!("Contrato with id {} deleted", id);
    Ok(res.rows_affected())
}
