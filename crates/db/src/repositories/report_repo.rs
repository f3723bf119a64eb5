//! Aggregate queries behind the dashboard, liquidation, map and export
//! views.
//!
//! Dashboard figures are computed one query at a time. A failing query
//! is logged and reported as zero so the summary itself never fails.

use agronexo_core::liquidation::{harvest_share, ContractType, NO_CONTRACT_OWNER};
use agronexo_core::period::{current_month, Period};
use agronexo_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::report::{
    DashboardSummary, GastoExportRow, Liquidacion, LluviaExportRow, MapaLote, ParcelAggregateRow,
};

/// Per-parcel totals. `$1`/`$2` bound to the current month window.
const PARCEL_AGGREGATES: &str = "\
    SELECT l.id AS lote_id, l.nombre AS lote, l.cultivo, l.hectareas, l.latitud, l.longitud, \
           c.id AS contrato_id, c.propietario, c.tipo, c.porcentaje_dueno, \
           COALESCE((SELECT SUM(k.kilos_totales) FROM cosechas k \
                     WHERE k.lote_id = l.id), 0)::float8 \
               AS total_cosechado, \
           COALESCE((SELECT SUM(g.monto) FROM gastos g WHERE g.lote_id = l.id), 0)::float8 \
               AS total_gastos, \
           COALESCE((SELECT SUM(r.milimetros) FROM lluvias r \
                     WHERE r.lote_id = l.id AND r.fecha >= $1 AND r.fecha < $2), 0)::float8 \
               AS lluvia_mes, \
           (SELECT COUNT(*) FROM animales a WHERE a.lote_actual_id = l.id AND a.activo = true) \
               AS animales_count \
    FROM lotes l \
    LEFT JOIN contratos_campo c ON c.lote_id = l.id \
    ORDER BY l.nombre, l.id";

/// Geolocated parcel row for the map view.
#[derive(Debug, FromRow)]
struct MapaRow {
    id: DbId,
    nombre: String,
    cultivo: Option<String>,
    hectareas: f64,
    latitud: Option<f64>,
    longitud: Option<f64>,
    animales_count: i64,
    lluvia_mes: f64,
}

/// Provides read-only aggregate views.
pub struct ReportRepo;

impl ReportRepo {
    /// Dashboard summary for the current calendar month.
    pub async fn dashboard(pool: &PgPool) -> DashboardSummary {
        Self::dashboard_for(pool, current_month()).await
    }

    /// Dashboard summary for an arbitrary month window.
    ///
    /// Never fails: every figure whose query errors is reported as zero.
    pub async fn dashboard_for(pool: &PgPool, month: Period) -> DashboardSummary {
        let livestock_margin = or_zero(
            "livestock_margin",
            scalar_f64(
                pool,
                "SELECT COALESCE(SUM(precio_total - costo_historico), 0)::float8 \
                 FROM ventas WHERE fecha >= $1 AND fecha < $2",
                Some(month),
            )
            .await,
        );
        let grain_sales = or_zero(
            "grain_sales",
            scalar_f64(
                pool,
                "SELECT COALESCE(SUM(precio_total), 0)::float8 \
                 FROM ventas_grano WHERE fecha >= $1 AND fecha < $2",
                Some(month),
            )
            .await,
        );

        DashboardSummary {
            animales_activos: or_zero(
                "animales_activos",
                scalar_i64(pool, "SELECT COUNT(*) FROM animales WHERE activo = true", None).await,
            ),
            animales_vendidos_mes: or_zero(
                "animales_vendidos_mes",
                scalar_i64(
                    pool,
                    "SELECT COUNT(*) FROM ventas WHERE fecha >= $1 AND fecha < $2",
                    Some(month),
                )
                .await,
            ),
            lotes_count: or_zero(
                "lotes_count",
                scalar_i64(pool, "SELECT COUNT(*) FROM lotes", None).await,
            ),
            hectareas_totales: or_zero(
                "hectareas_totales",
                scalar_f64(pool, "SELECT COALESCE(SUM(hectareas), 0)::float8 FROM lotes", None)
                    .await,
            ),
            stock_granos_kilos: or_zero(
                "stock_granos_kilos",
                scalar_f64(
                    pool,
                    "SELECT COALESCE(SUM(kilos_actuales), 0)::float8 FROM silos",
                    None,
                )
                .await,
            ),
            gastos_mes: or_zero(
                "gastos_mes",
                scalar_f64(
                    pool,
                    "SELECT COALESCE(SUM(monto), 0)::float8 FROM gastos \
                     WHERE fecha >= $1 AND fecha < $2",
                    Some(month),
                )
                .await,
            ),
            margen_mes: livestock_margin + grain_sales,
            lluvia_promedio_mes: or_zero(
                "lluvia_promedio_mes",
                scalar_f64(
                    pool,
                    "SELECT COALESCE(AVG(total), 0)::float8 FROM ( \
                        SELECT SUM(milimetros) AS total FROM lluvias \
                        WHERE fecha >= $1 AND fecha < $2 GROUP BY lote_id \
                     ) per_lote",
                    Some(month),
                )
                .await,
            ),
            alertas_stock: or_zero(
                "alertas_stock",
                scalar_i64(
                    pool,
                    "SELECT COUNT(*) FROM insumos WHERE stock <= punto_reposicion",
                    None,
                )
                .await,
            ),
            caja: or_zero(
                "caja",
                scalar_f64(
                    pool,
                    "SELECT ( \
                        (SELECT COALESCE(SUM(precio_total), 0) FROM ventas) \
                        + (SELECT COALESCE(SUM(precio_total), 0) FROM ventas_grano) \
                        - (SELECT COALESCE(SUM(monto), 0) FROM gastos) \
                     )::float8",
                    None,
                )
                .await,
            ),
        }
    }

    /// Liquidation view: one row per parcel, with or without contract.
    pub async fn liquidations(pool: &PgPool) -> Result<Vec<Liquidacion>, sqlx::Error> {
        Self::liquidations_for(pool, current_month()).await
    }

    /// Liquidation view with rainfall summed over `month`.
    pub async fn liquidations_for(
        pool: &PgPool,
        month: Period,
    ) -> Result<Vec<Liquidacion>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ParcelAggregateRow>(PARCEL_AGGREGATES)
            .bind(month.start)
            .bind(month.end)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(liquidation_from_row).collect())
    }

    /// Parcels with coordinates, for the map view.
    pub async fn map(pool: &PgPool) -> Result<Vec<MapaLote>, sqlx::Error> {
        let month = current_month();
        let rows = sqlx::query_as::<_, MapaRow>(
            "SELECT l.id, l.nombre, l.cultivo, l.hectareas, l.latitud, l.longitud, \
                    (SELECT COUNT(*) FROM animales a \
                     WHERE a.lote_actual_id = l.id AND a.activo = true) AS animales_count, \
                    COALESCE((SELECT SUM(r.milimetros) FROM lluvias r \
                              WHERE r.lote_id = l.id \
                                AND r.fecha >= $1 AND r.fecha < $2), 0)::float8 \
                        AS lluvia_mes \
             FROM lotes l \
             WHERE l.latitud IS NOT NULL AND l.longitud IS NOT NULL \
             ORDER BY l.nombre, l.id",
        )
        .bind(month.start)
        .bind(month.end)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                Some(MapaLote {
                    id: row.id,
                    nombre: row.nombre,
                    cultivo: row.cultivo,
                    hectareas: row.hectareas,
                    lat: row.latitud?,
                    lng: row.longitud?,
                    animales_count: row.animales_count,
                    lluvia_mes: row.lluvia_mes,
                })
            })
            .collect())
    }

    /// Expense rows for the spreadsheet export, oldest first.
    pub async fn expense_export(pool: &PgPool) -> Result<Vec<GastoExportRow>, sqlx::Error> {
        sqlx::query_as::<_, GastoExportRow>(
            "SELECT g.fecha, g.concepto, g.categoria, g.monto, l.nombre AS lote, a.caravana \
             FROM gastos g \
             LEFT JOIN lotes l ON l.id = g.lote_id \
             LEFT JOIN animales a ON a.id = g.animal_id \
             ORDER BY g.fecha, g.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Rainfall rows for the spreadsheet export, oldest first.
    pub async fn rainfall_export(pool: &PgPool) -> Result<Vec<LluviaExportRow>, sqlx::Error> {
        sqlx::query_as::<_, LluviaExportRow>(
            "SELECT r.fecha, l.nombre AS lote, r.milimetros \
             FROM lluvias r JOIN lotes l ON l.id = r.lote_id \
             ORDER BY r.fecha, r.id",
        )
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn liquidation_from_row(row: ParcelAggregateRow) -> Liquidacion {
    let tipo = row
        .tipo
        .as_deref()
        .and_then(|t| t.parse::<ContractType>().ok())
        .unwrap_or(ContractType::Propio);
    let porcentaje = row.porcentaje_dueno.unwrap_or(0.0);
    let share = harvest_share(row.total_cosechado, tipo, porcentaje);
    Liquidacion {
        lote_id: row.lote_id,
        lote: row.lote,
        cultivo: row.cultivo,
        hectareas: row.hectareas,
        contrato_id: row.contrato_id,
        propietario: row
            .propietario
            .unwrap_or_else(|| NO_CONTRACT_OWNER.to_string()),
        tipo: tipo.as_str().to_string(),
        porcentaje,
        total_cosechado: share.total_kilos,
        kilos_dueno: share.owner_kilos,
        kilos_propios: share.own_kilos,
        total_gastos: row.total_gastos,
        lluvia_mes: row.lluvia_mes,
        animales_count: row.animales_count,
        lat: row.latitud,
        lng: row.longitud,
    }
}

fn or_zero<T: Default>(figure: &'static str, result: Result<T, sqlx::Error>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(figure, error = %e, "Dashboard figure unavailable, reporting zero");
        T::default()
    })
}

async fn scalar_f64(pool: &PgPool, sql: &str, month: Option<Period>) -> Result<f64, sqlx::Error> {
    let mut query = sqlx::query_scalar::<_, f64>(sql);
    if let Some(month) = month {
        query = query.bind(month.start).bind(month.end);
    }
    query.fetch_one(pool).await
}

async fn scalar_i64(pool: &PgPool, sql: &str, month: Option<Period>) -> Result<i64, sqlx::Error> {
    let mut query = sqlx::query_scalar::<_, i64>(sql);
    if let Some(month) = month {
        query = query.bind(month.start).bind(month.end);
    }
    query.fetch_one(pool).await
}
