//! Entity modules addressable through the generic `/{modulo}` routes.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Every entity type exposed by the generic dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Animales,
    Lotes,
    Contratos,
    Pesajes,
    Gastos,
    Ventas,
    Lluvias,
    Silos,
    Cosechas,
    VentasGrano,
    EventosReproductivos,
    Protocolos,
    InsumosGeneticos,
    Insumos,
}

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Animales,
        EntityKind::Lotes,
        EntityKind::Contratos,
        EntityKind::Pesajes,
        EntityKind::Gastos,
        EntityKind::Ventas,
        EntityKind::Lluvias,
        EntityKind::Silos,
        EntityKind::Cosechas,
        EntityKind::VentasGrano,
        EntityKind::EventosReproductivos,
        EntityKind::Protocolos,
        EntityKind::InsumosGeneticos,
        EntityKind::Insumos,
    ];

    /// Canonical module name used in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Animales => "animales",
            EntityKind::Lotes => "lotes",
            EntityKind::Contratos => "contratos",
            EntityKind::Pesajes => "pesajes",
            EntityKind::Gastos => "gastos",
            EntityKind::Ventas => "ventas",
            EntityKind::Lluvias => "lluvias",
            EntityKind::Silos => "silos",
            EntityKind::Cosechas => "cosechas",
            EntityKind::VentasGrano => "ventas_grano",
            EntityKind::EventosReproductivos => "eventos_reproductivos",
            EntityKind::Protocolos => "protocolos",
            EntityKind::InsumosGeneticos => "insumos_geneticos",
            EntityKind::Insumos => "insumos",
        }
    }

    /// Singular display name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            EntityKind::Animales => "Animal",
            EntityKind::Lotes => "Lote",
            EntityKind::Contratos => "ContratoCampo",
            EntityKind::Pesajes => "Pesaje",
            EntityKind::Gastos => "Gasto",
            EntityKind::Ventas => "Venta",
            EntityKind::Lluvias => "Lluvia",
            EntityKind::Silos => "Silo",
            EntityKind::Cosechas => "Cosecha",
            EntityKind::VentasGrano => "VentaGrano",
            EntityKind::EventosReproductivos => "EventoReproductivo",
            EntityKind::Protocolos => "Protocolo",
            EntityKind::InsumosGeneticos => "InsumoGenetico",
            EntityKind::Insumos => "Insumo",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if let Some(kind) = EntityKind::ALL.into_iter().find(|k| k.as_str() == name) {
            return Ok(kind);
        }
        match name.as_str() {
            "ganaderia" | "animal" => Ok(EntityKind::Animales),
            "agricultura" | "lote" => Ok(EntityKind::Lotes),
            "lluvia" => Ok(EntityKind::Lluvias),
            "gasto" => Ok(EntityKind::Gastos),
            "silo" => Ok(EntityKind::Silos),
            "insumo" => Ok(EntityKind::Insumos),
            _ => Err(CoreError::Validation(format!("Unknown module '{s}'"))),
        }
    }
}
