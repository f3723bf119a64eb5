//! Reproductive status table for breeding females.
//!
//! Each recorded event maps to a resulting status:
//!
//! | Event          | Resulting status                                   |
//! |----------------|----------------------------------------------------|
//! | `INSEMINACION` | `INSEMINADA`                                       |
//! | `TACTO`        | `PREÑADA` if the detail contains `POSITIVO`, else `VACIA` |
//! | `PARTO`        | `PARIDA`                                           |
//!
//! The table never rejects a sequence. [`is_expected_transition`] reports
//! whether a transition follows the usual breeding cycle so callers can log
//! unusual histories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default status for newly registered animals.
pub const DEFAULT_STATUS: ReproductiveStatus = ReproductiveStatus::Vacia;

/// Marker searched for (case-insensitive) in a TACTO detail.
pub const POSITIVE_MARKER: &str = "POSITIVO";

/// Expense category booked for priced reproductive events.
pub const EXPENSE_CATEGORY: &str = "REPRODUCCION";

/// Reproductive status stored on each animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReproductiveStatus {
    #[serde(rename = "VACIA")]
    Vacia,
    #[serde(rename = "INSEMINADA")]
    Inseminada,
    #[serde(rename = "PREÑADA")]
    Prenada,
    #[serde(rename = "PARIDA")]
    Parida,
}

impl ReproductiveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReproductiveStatus::Vacia => "VACIA",
            ReproductiveStatus::Inseminada => "INSEMINADA",
            ReproductiveStatus::Prenada => "PREÑADA",
            ReproductiveStatus::Parida => "PARIDA",
        }
    }
}

impl fmt::Display for ReproductiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReproductiveStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VACIA" => Ok(ReproductiveStatus::Vacia),
            "INSEMINADA" => Ok(ReproductiveStatus::Inseminada),
            // Older clients could not send the Ñ.
            "PREÑADA" | "PRENADA" => Ok(ReproductiveStatus::Prenada),
            "PARIDA" => Ok(ReproductiveStatus::Parida),
            other => Err(CoreError::Validation(format!(
                "Invalid reproductive status '{other}'. \
                 Must be one of: VACIA, INSEMINADA, PREÑADA, PARIDA"
            ))),
        }
    }
}

/// Kind of reproductive event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReproductiveEventKind {
    Inseminacion,
    Tacto,
    Parto,
}

impl ReproductiveEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReproductiveEventKind::Inseminacion => "INSEMINACION",
            ReproductiveEventKind::Tacto => "TACTO",
            ReproductiveEventKind::Parto => "PARTO",
        }
    }
}

impl fmt::Display for ReproductiveEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReproductiveEventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INSEMINACION" | "INSEMINACIÓN" => Ok(ReproductiveEventKind::Inseminacion),
            "TACTO" => Ok(ReproductiveEventKind::Tacto),
            "PARTO" => Ok(ReproductiveEventKind::Parto),
            other => Err(CoreError::Validation(format!(
                "Invalid event type '{other}'. Must be one of: INSEMINACION, TACTO, PARTO"
            ))),
        }
    }
}

/// Status an animal ends up in after an event, regardless of its current one.
pub fn resulting_status(kind: ReproductiveEventKind, detail: &str) -> ReproductiveStatus {
    match kind {
        ReproductiveEventKind::Inseminacion => ReproductiveStatus::Inseminada,
        ReproductiveEventKind::Tacto => {
            if detail.to_uppercase().contains(POSITIVE_MARKER) {
                ReproductiveStatus::Prenada
            } else {
                ReproductiveStatus::Vacia
            }
        }
        ReproductiveEventKind::Parto => ReproductiveStatus::Parida,
    }
}

/// Whether `kind` is a usual next step from `current` in the breeding cycle.
pub fn is_expected_transition(current: ReproductiveStatus, kind: ReproductiveEventKind) -> bool {
    use ReproductiveEventKind as E;
    use ReproductiveStatus as S;
    match kind {
        E::Inseminacion => matches!(current, S::Vacia | S::Parida | S::Inseminada),
        E::Tacto => matches!(current, S::Inseminada | S::Prenada | S::Vacia),
        E::Parto => current == S::Prenada,
    }
}

/// Whether recording this event should spawn a calf record.
pub fn spawns_calf(kind: ReproductiveEventKind) -> bool {
    kind == ReproductiveEventKind::Parto
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insemination_marks_inseminated() {
        assert_eq!(
            resulting_status(ReproductiveEventKind::Inseminacion, ""),
            ReproductiveStatus::Inseminada
        );
    }

    #[test]
    fn positive_check_marks_pregnant() {
        assert_eq!(
            resulting_status(ReproductiveEventKind::Tacto, "POSITIVO"),
            ReproductiveStatus::Prenada
        );
        assert_eq!(
            resulting_status(ReproductiveEventKind::Tacto, "tacto positivo 60 dias"),
            ReproductiveStatus::Prenada
        );
    }

    #[test]
    fn any_other_check_marks_empty() {
        assert_eq!(
            resulting_status(ReproductiveEventKind::Tacto, "NEGATIVO"),
            ReproductiveStatus::Vacia
        );
        assert_eq!(
            resulting_status(ReproductiveEventKind::Tacto, ""),
            ReproductiveStatus::Vacia
        );
    }

    #[test]
    fn birth_marks_calved_and_spawns_calf() {
        assert_eq!(
            resulting_status(ReproductiveEventKind::Parto, "macho"),
            ReproductiveStatus::Parida
        );
        assert!(spawns_calf(ReproductiveEventKind::Parto));
        assert!(!spawns_calf(ReproductiveEventKind::Tacto));
    }

    #[test]
    fn birth_without_pregnancy_is_unexpected() {
        assert!(!is_expected_transition(
            ReproductiveStatus::Vacia,
            ReproductiveEventKind::Parto
        ));
        assert!(is_expected_transition(
            ReproductiveStatus::Prenada,
            ReproductiveEventKind::Parto
        ));
    }

    #[test]
    fn status_parses_with_and_without_enye() {
        assert_eq!(
            "preñada".parse::<ReproductiveStatus>().unwrap(),
            ReproductiveStatus::Prenada
        );
        assert_eq!(
            "PRENADA".parse::<ReproductiveStatus>().unwrap(),
            ReproductiveStatus::Prenada
        );
        assert!("SECA".parse::<ReproductiveStatus>().is_err());
    }

    #[test]
    fn status_serializes_with_enye() {
        let json = serde_json::to_string(&ReproductiveStatus::Prenada).unwrap();
        assert_eq!(json, "\"PREÑADA\"");
    }

    #[test]
    fn event_kind_uses_uppercase_wire_names() {
        let kind: ReproductiveEventKind = serde_json::from_str("\"INSEMINACION\"").unwrap();
        assert_eq!(kind, ReproductiveEventKind::Inseminacion);
        assert_eq!(kind.to_string(), "INSEMINACION");
    }

    #[test]
    fn event_kind_parses_lowercase_and_accented() {
        assert_eq!(
            "inseminación".parse::<ReproductiveEventKind>().unwrap(),
            ReproductiveEventKind::Inseminacion
        );
        assert_eq!("parto".parse::<ReproductiveEventKind>().unwrap(), ReproductiveEventKind::Parto);
        assert!("ECOGRAFIA".parse::<ReproductiveEventKind>().is_err());
    }
}
