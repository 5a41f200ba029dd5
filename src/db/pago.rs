use sqlx::SqlitePool;

use crate::models::Pago;

pub async fn obtener_todos(pool: &SqlitePool) -> Result<Vec<Pago>, sqlx::Error> {
    sqlx::query_as::<_, Pago>("SELECT * FROM pagos ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn obtener_por_id(pool: &SqlitePool, id: i64) -> Result<Option<Pago>, sqlx::Error> {
    sqlx::query_as::<_, Pago>("SELECT * FROM pagos WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn alta(pool: &SqlitePool, e: &Pago) -> Result<Pago, sqlx::Error> {
    let creado = sqlx::query_as::<_, Pago>(
        "INSERT INTO pagos (id_contrato, fecha, importe, concepto) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(e.id_contrato)
    .bind(e.fecha)
    .bind(e.importe)
    .bind(&e.concepto)
    .fetch_one(pool)
    .await?;
    log::info!("Pago created with id {}", creado.id);
    Ok(creado)
}

pub async fn modificacion(pool: &SqlitePool, e: &Pago) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE pagos SET id_contrato = $1, fecha = $2, importe = $3, concepto = $4 \
         WHERE id = $5",
    )
    .bind(e.id_contrato)
    .bind(e.fecha)
    .bind(e.importe)
    .bind(&e.concepto)
    .bind(e.id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn baja(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM pagos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    log::info!("Pago with id {} deleted", id);
    Ok(res.rows_affected())
}
