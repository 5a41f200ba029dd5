use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Propietario {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub telefono: String,
    pub email: String,
    /// Hash argon2 en formato PHC, nunca la clave en texto plano.
    pub clave: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Inquilino {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub telefono: String,
    pub direccion: String,
    pub email: String,
    pub lugar_trabajo: String,
    pub nombre_garante: String,
    pub apellido_garante: String,
    pub dni_garante: String,
    pub telefono_garante: String,
    pub direccion_garante: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Inmueble {
    pub id: i64,
    pub direccion: String,
    pub id_propietario: i64,
    pub tipo: String,
    pub ambientes: i64,
    pub estado: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Contrato {
    pub id: i64,
    pub id_inquilino: i64,
    pub id_inmueble: i64,
    pub fecha_desde: NaiveDate,
    pub fecha_hasta: NaiveDate,
    pub monto_mensual: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Pago {
    pub id: i64,
    pub id_contrato: i64,
    pub fecha: NaiveDate,
    pub importe: f64,
    pub concepto: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, sqlx::Type)]
pub enum Rol {
    Administrador,
    Empleado,
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rol::Administrador => write!(f, "Administrador"),
            Rol::Empleado => write!(f, "Empleado"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nombre_usuario: String,
    pub rol: Rol,
    pub clave: String,
}
