//! Repositorios SQL, un módulo por entidad.
//!
//! Todas las operaciones usan parámetros vinculados y el pool compartido;
//! `alta` hace `INSERT .. RETURNING` así la fila insertada y su id generado
//! llegan en una sola sentencia.

pub mod contrato;
pub mod inmueble;
pub mod inquilino;
pub mod pago;
pub mod propietario;
pub mod usuario;
