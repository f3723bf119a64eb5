//! Target selection and even splitting for bulk operations.
//!
//! A bulk expense or reproductive event is addressed to a selector rather
//! than to explicit ids. The selector is resolved against active animals
//! only; sold or deactivated animals never receive fan-out rows.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Which active animals a bulk operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "objetivo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalSelector {
    /// Every active animal.
    Todos,
    /// Active animals not assigned to any parcel.
    SinLote,
    /// Active animals currently in the given parcel.
    Lote { lote_id: DbId },
}

impl AnimalSelector {
    /// Build a selector from the loose form fields `objetivo` and `lote_id`.
    ///
    /// `objetivo` is case-insensitive (`todos`, `sin_lote`, `lote`). A parcel
    /// target needs `lote_id`.
    pub fn from_parts(objetivo: &str, lote_id: Option<DbId>) -> Result<Self, CoreError> {
        match objetivo.trim().to_uppercase().replace(' ', "_").as_str() {
            "TODOS" => Ok(AnimalSelector::Todos),
            "SIN_LOTE" => Ok(AnimalSelector::SinLote),
            "LOTE" => lote_id
                .map(|lote_id| AnimalSelector::Lote { lote_id })
                .ok_or_else(|| {
                    CoreError::Validation("lote_id is required when objetivo is LOTE".to_string())
                }),
            other => Err(CoreError::Validation(format!(
                "Invalid objetivo '{other}'. Must be one of: TODOS, SIN_LOTE, LOTE"
            ))),
        }
    }
}

/// Split `total` evenly across `count` recipients.
pub fn split_evenly(total: f64, count: usize) -> Result<f64, CoreError> {
    if !total.is_finite() || total <= 0.0 {
        return Err(CoreError::Validation(
            "monto must be greater than zero".to_string(),
        ));
    }
    if count == 0 {
        return Err(CoreError::Validation(
            "No animals match the selected target".to_string(),
        ));
    }
    Ok(total / count as f64)
}
