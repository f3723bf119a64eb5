//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO holding already-parsed values for inserts
//! - An update DTO (all `Option` fields) for field overwrites, where the
//!   entity supports editing

pub mod animal;
pub mod catalog;
pub mod contrato;
pub mod cosecha;
pub mod evento_reproductivo;
pub mod gasto;
pub mod insumo;
pub mod lluvia;
pub mod lote;
pub mod pesaje;
pub mod report;
pub mod silo;
pub mod venta;
pub mod venta_grano;
