pub mod animal;
pub mod catalog;
pub mod dashboard;
pub mod export;
pub mod gasto;
pub mod grain;
pub mod insumo;
pub mod lluvia;
pub mod lote;
pub mod modules;
pub mod reproduction;
pub mod reset;
pub mod venta;
