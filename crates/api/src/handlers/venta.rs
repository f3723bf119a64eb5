//! Handler for livestock sales.

use agronexo_db::models::venta::Venta;
use agronexo_db::repositories::VentaRepo;
use agronexo_db::DbPool;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::request::{parse_body, VentaBody};
use crate::response::DataResponse;
use crate::state::AppState;

/// Sell an animal. Its accumulated expenses are frozen into the sale and the
/// animal leaves the active herd. Selling twice is a conflict.
pub async fn register_sale(pool: &DbPool, body: serde_json::Value) -> AppResult<Venta> {
    let input = parse_body::<VentaBody>(body)?.into_create()?;
    let venta = VentaRepo::register(pool, &input).await?;
    tracing::info!(
        venta_id = venta.id,
        animal_id = venta.animal_id,
        precio_total = venta.precio_total,
        costo_historico = venta.costo_historico,
        "Animal sold"
    );
    Ok(venta)
}

/// POST /api/registrar_venta
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let venta = register_sale(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: venta })))
}
