//! Spreadsheet export as a CSV attachment.

use agronexo_core::export::{to_csv, ExportSheet};
use agronexo_db::repositories::{AnimalRepo, ReportRepo};
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::AppResult;
use crate::query::ExportParams;
use crate::state::AppState;

/// GET /api/exportar_excel?hoja=hacienda|gastos|lluvias|liquidaciones
///
/// The herd sheet includes sold and deactivated animals.
pub async fn export_sheet(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let sheet: ExportSheet = params.hoja.as_deref().unwrap_or_default().parse()?;

    let csv = match sheet {
        ExportSheet::Hacienda => to_csv(&AnimalRepo::list_overview(&state.pool, true).await?)?,
        ExportSheet::Gastos => to_csv(&ReportRepo::expense_export(&state.pool).await?)?,
        ExportSheet::Lluvias => to_csv(&ReportRepo::rainfall_export(&state.pool).await?)?,
        ExportSheet::Liquidaciones => to_csv(&ReportRepo::liquidations(&state.pool).await?)?,
    };
    tracing::info!(hoja = %sheet, bytes = csv.len(), "Spreadsheet exported");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", sheet.filename()),
            ),
        ],
        csv,
    ))
}
