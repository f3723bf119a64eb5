//! Harvest destinations, grain sale origins, and silo stock checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where a harvest goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HarvestDestination {
    /// Sold straight from the field.
    Venta,
    /// Stored in a silo; increments its stock.
    Silo,
}

impl HarvestDestination {
    pub fn as_str(self) -> &'static str {
        match self {
            HarvestDestination::Venta => "VENTA",
            HarvestDestination::Silo => "SILO",
        }
    }
}

impl fmt::Display for HarvestDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarvestDestination {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VENTA" => Ok(HarvestDestination::Venta),
            "SILO" => Ok(HarvestDestination::Silo),
            other => Err(CoreError::Validation(format!(
                "Invalid destination '{other}'. Must be one of: VENTA, SILO"
            ))),
        }
    }
}

/// Where sold grain comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GrainOrigin {
    /// Taken from a silo; decrements its stock.
    Silo,
    /// Sold directly without touching stock.
    #[serde(alias = "DIRECT")]
    Directo,
}

impl GrainOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            GrainOrigin::Silo => "SILO",
            GrainOrigin::Directo => "DIRECTO",
        }
    }
}

impl fmt::Display for GrainOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrainOrigin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SILO" => Ok(GrainOrigin::Silo),
            "DIRECTO" | "DIRECT" => Ok(GrainOrigin::Directo),
            other => Err(CoreError::Validation(format!(
                "Invalid origin '{other}'. Must be one of: SILO, DIRECTO"
            ))),
        }
    }
}

/// Stock after storing `kilos` in a silo.
///
/// A capacity of zero means the silo has no declared limit.
pub fn stock_after_deposit(current: f64, capacity: f64, kilos: f64) -> Result<f64, CoreError> {
    let next = current + kilos;
    if capacity > 0.0 && next > capacity {
        return Err(CoreError::Validation(format!(
            "Silo capacity exceeded: {next} kg stored would exceed {capacity} kg"
        )));
    }
    Ok(next)
}

/// Check that a silo holding `stock` kilos fits within `capacity`.
///
/// A capacity of zero means the silo has no declared limit.
pub fn check_capacity(capacity: f64, stock: f64) -> Result<(), CoreError> {
    if capacity > 0.0 && stock > capacity {
        return Err(CoreError::Validation(format!(
            "Silo capacity of {capacity} kg is below the {stock} kg it holds"
        )));
    }
    Ok(())
}

/// Stock after withdrawing `kilos` from a silo.
pub fn stock_after_withdrawal(current: f64, kilos: f64) -> Result<f64, CoreError> {
    if kilos > current {
        return Err(CoreError::Validation(format!(
            "Insufficient silo stock: requested {kilos} kg, available {current} kg"
        )));
    }
    Ok(current - kilos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn deposit_within_capacity() {
        assert_eq!(stock_after_deposit(100.0, 1_000.0, 400.0).unwrap(), 500.0);
    }

    #[test]
    fn deposit_beyond_capacity_is_rejected() {
        assert_matches!(
            stock_after_deposit(900.0, 1_000.0, 200.0),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unlimited_silo_accepts_anything() {
        assert_eq!(stock_after_deposit(0.0, 0.0, 1e9).unwrap(), 1e9);
    }

    #[test]
    fn capacity_cannot_shrink_below_stock() {
        assert!(check_capacity(1_000.0, 1_000.0).is_ok());
        assert!(check_capacity(0.0, 5_000.0).is_ok());
        assert_matches!(check_capacity(999.0, 1_000.0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn withdrawal_cannot_go_negative() {
        assert_eq!(stock_after_withdrawal(500.0, 500.0).unwrap(), 0.0);
        assert!(stock_after_withdrawal(500.0, 501.0).is_err());
    }

    #[test]
    fn direct_origin_accepts_english_alias() {
        let origin: GrainOrigin = serde_json::from_str("\"DIRECT\"").unwrap();
        assert_eq!(origin, GrainOrigin::Directo);
    }

    #[test]
    fn destination_and_origin_parse_case_insensitively() {
        assert_eq!("silo".parse::<HarvestDestination>().unwrap(), HarvestDestination::Silo);
        assert_eq!(" direct ".parse::<GrainOrigin>().unwrap(), GrainOrigin::Directo);
        assert_matches!("camion".parse::<HarvestDestination>(), Err(CoreError::Validation(_)));
    }
}
