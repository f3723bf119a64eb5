//! Handlers for parcels (`lotes`) and their field contracts.

use agronexo_core::error::CoreError;
use agronexo_core::parsing::required_id;
use agronexo_core::types::DbId;
use agronexo_db::models::contrato::ContratoCampo;
use agronexo_db::models::lote::Lote;
use agronexo_db::repositories::{ContratoRepo, LoteRepo};
use agronexo_db::DbPool;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::request::{parse_body, ContratoLoteBody, LoteContratoBody};
use crate::response::DataResponse;
use crate::state::AppState;

/// A parcel together with its contract, when it has one.
#[derive(Debug, Serialize)]
pub struct LoteConContrato {
    #[serde(flatten)]
    pub lote: Lote,
    pub contrato: Option<ContratoCampo>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create a parcel. A contract is attached only when contract fields are sent.
pub async fn create_lote(pool: &DbPool, body: serde_json::Value) -> AppResult<LoteConContrato> {
    let body = parse_body::<LoteContratoBody>(body)?;
    let input = body.lote.into_create()?;
    let created = match body.contrato.into_optional_terms()? {
        Some(terms) => {
            let (lote, contrato) = LoteRepo::create_with_contract(pool, &input, &terms).await?;
            LoteConContrato {
                lote,
                contrato: Some(contrato),
            }
        }
        None => LoteConContrato {
            lote: LoteRepo::create(pool, &input).await?,
            contrato: None,
        },
    };
    tracing::info!(lote_id = created.lote.id, nombre = %created.lote.nombre, "Parcel created");
    Ok(created)
}

/// Create a parcel and its contract. Missing terms mean an owned parcel.
pub async fn create_lote_with_contract(
    pool: &DbPool,
    body: serde_json::Value,
) -> AppResult<LoteConContrato> {
    let body = parse_body::<LoteContratoBody>(body)?;
    let input = body.lote.into_create()?;
    let terms = body.contrato.into_terms()?;
    let (lote, contrato) = LoteRepo::create_with_contract(pool, &input, &terms).await?;
    tracing::info!(
        lote_id = lote.id,
        contrato_id = contrato.id,
        tipo = %contrato.tipo,
        "Parcel created with contract"
    );
    Ok(LoteConContrato {
        lote,
        contrato: Some(contrato),
    })
}

/// Overwrite parcel fields; contract terms are upserted when sent.
pub async fn update_lote(
    pool: &DbPool,
    id: DbId,
    body: serde_json::Value,
) -> AppResult<LoteConContrato> {
    let body = parse_body::<LoteContratoBody>(body)?;
    let input = body.lote.into_update()?;
    let terms = body.contrato.into_optional_terms()?;
    let (lote, contrato) = LoteRepo::update_with_contract(pool, id, &input, terms.as_ref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lote", id }))?;
    let contrato = match contrato {
        Some(c) => Some(c),
        None => ContratoRepo::find_by_lote(pool, id).await?,
    };
    tracing::info!(lote_id = id, contract_written = terms.is_some(), "Parcel updated");
    Ok(LoteConContrato { lote, contrato })
}

pub async fn delete_lote(pool: &DbPool, id: DbId) -> AppResult<()> {
    if !LoteRepo::delete_cascade(pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Lote", id }));
    }
    Ok(())
}

/// Attach a contract to an existing parcel that has none.
pub async fn create_contract(pool: &DbPool, body: serde_json::Value) -> AppResult<ContratoCampo> {
    let body = parse_body::<ContratoLoteBody>(body)?;
    let lote_id = required_id("lote_id", body.lote_id.as_ref())?;
    let terms = body.contrato.into_terms()?;
    if LoteRepo::find_by_id(pool, lote_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lote",
            id: lote_id,
        }));
    }
    let contrato = ContratoRepo::create(pool, lote_id, &terms).await?;
    tracing::info!(lote_id, contrato_id = contrato.id, "Contract created");
    Ok(contrato)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/nuevo_contrato
pub async fn create_with_contract(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let created = create_lote_with_contract(&state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/editar_lote/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let updated = update_lote(&state.pool, id, body).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/eliminar_lote/{id}
///
/// Removes the parcel with its contract, expenses, harvests and rainfall.
/// Animals standing in it are left without a parcel.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_lote(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
