//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive` flag.
///
/// Used by the herd listings, where sold or deactivated animals are hidden
/// by default.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Query parameters for `GET /api/exportar_excel`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    /// Sheet name; defaults to the herd sheet.
    #[serde(default)]
    pub hoja: Option<String>,
}
