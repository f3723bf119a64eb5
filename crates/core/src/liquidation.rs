//! Field contracts and harvest liquidation math.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Owner name shown for parcels that have no contract yet.
pub const NO_CONTRACT_OWNER: &str = "Sin contrato";

/// How a parcel is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    /// Owned outright.
    Propio,
    /// Rented for a fixed fee; the owner takes no share of the harvest.
    Alquilado,
    /// Share-cropping: the owner takes a percentage of the harvest.
    Aparceria,
}

impl ContractType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractType::Propio => "PROPIO",
            ContractType::Alquilado => "ALQUILADO",
            ContractType::Aparceria => "APARCERIA",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PROPIO" => Ok(ContractType::Propio),
            "ALQUILADO" => Ok(ContractType::Alquilado),
            "APARCERIA" | "APARCERÍA" => Ok(ContractType::Aparceria),
            other => Err(CoreError::Validation(format!(
                "Invalid contract type '{other}'. Must be one of: PROPIO, ALQUILADO, APARCERIA"
            ))),
        }
    }
}

/// Split of a parcel's harvest between the farm and the land owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarvestShare {
    pub total_kilos: f64,
    pub owner_kilos: f64,
    pub own_kilos: f64,
}

/// Compute the owner's share of a parcel's harvest.
///
/// Only share-cropping contracts give the owner a share
/// (`total * percentage / 100`); every other contract type yields zero.
pub fn harvest_share(total_kilos: f64, contract: ContractType, owner_pct: f64) -> HarvestShare {
    let owner_kilos = match contract {
        ContractType::Aparceria => total_kilos * (owner_pct / 100.0),
        ContractType::Propio | ContractType::Alquilado => 0.0,
    };
    HarvestShare {
        total_kilos,
        owner_kilos,
        own_kilos: total_kilos - owner_kilos,
    }
}
