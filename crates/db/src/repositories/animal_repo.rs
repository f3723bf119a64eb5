//! Repository for the `animales` table.

use std::collections::HashMap;

use agronexo_core::error::CoreError;
use agronexo_core::fanout::AnimalSelector;
use agronexo_core::livestock::{daily_gain, WeighingPoint};
use agronexo_core::reproduction::ReproductiveStatus;
use agronexo_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::error::RepoResult;
use crate::models::animal::{
    Animal, AnimalOverview, AnimalOverviewRow, CreateAnimal, UpdateAnimal,
};
use crate::models::report::AnimalDetail;
use crate::repositories::{GastoRepo, PesajeRepo, ReproductiveEventRepo, VentaRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, caravana, categoria, raza, peso_actual, estado_reproductivo, \
    lote_actual_id, madre_id, fecha_carencia, activo, fecha_ingreso, created_at, updated_at";

/// Overview projection: animal, parcel name and accumulated expenses.
const OVERVIEW_SELECT: &str = "\
    SELECT a.id, a.caravana, a.categoria, a.raza, a.estado_reproductivo, \
           a.lote_actual_id, l.nombre AS lote_nombre, a.activo, a.fecha_carencia, \
           a.peso_actual, \
           COALESCE((SELECT SUM(g.monto) FROM gastos g WHERE g.animal_id = a.id), 0)::float8 \
               AS costo_acumulado \
    FROM animales a \
    LEFT JOIN lotes l ON l.id = a.lote_actual_id";

/// One of the two most recent weighings of an animal.
#[derive(Debug, FromRow)]
struct RecentWeighing {
    animal_id: DbId,
    kilos: f64,
    fecha: Timestamp,
}

/// Provides CRUD operations and herd queries for animals.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Register an animal. When `peso_inicial` is given it becomes the
    /// current weight and the first weighing, in the same transaction.
    pub async fn create(pool: &PgPool, input: &CreateAnimal) -> Result<Animal, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let animal = Self::insert_in_tx(&mut tx, input).await?;
        if let Some(kilos) = input.peso_inicial {
            PesajeRepo::insert_in_tx(&mut tx, animal.id, kilos, input.fecha_ingreso).await?;
        }
        tx.commit().await?;
        Ok(animal)
    }

    /// Find an animal by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animales WHERE id = $1");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an animal by its tag.
    pub async fn find_by_caravana(
        pool: &PgPool,
        caravana: &str,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animales WHERE caravana = $1");
        sqlx::query_as::<_, Animal>(&query)
            .bind(caravana)
            .fetch_optional(pool)
            .await
    }

    /// List animals ordered by tag, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Animal>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM animales ORDER BY caravana")
        } else {
            format!("SELECT {COLUMNS} FROM animales WHERE activo = true ORDER BY caravana")
        };
        sqlx::query_as::<_, Animal>(&query).fetch_all(pool).await
    }

    /// Calves registered with `madre_id` as their mother.
    pub async fn list_calves(pool: &PgPool, madre_id: DbId) -> Result<Vec<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animales WHERE madre_id = $1 ORDER BY id");
        sqlx::query_as::<_, Animal>(&query)
            .bind(madre_id)
            .fetch_all(pool)
            .await
    }

    /// Herd listing with parcel name, daily gain, last weighing date and
    /// accumulated cost per animal.
    pub async fn list_overview(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<AnimalOverview>, sqlx::Error> {
        let query = if include_inactive {
            format!("{OVERVIEW_SELECT} ORDER BY a.caravana")
        } else {
            format!("{OVERVIEW_SELECT} WHERE a.activo = true ORDER BY a.caravana")
        };
        let rows = sqlx::query_as::<_, AnimalOverviewRow>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_weighings(pool, rows).await
    }

    /// Overview of a single animal.
    pub async fn overview(pool: &PgPool, id: DbId) -> Result<Option<AnimalOverview>, sqlx::Error> {
        let query = format!("{OVERVIEW_SELECT} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AnimalOverviewRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Self::attach_weighings(pool, vec![row]).await?.pop())
    }

    /// Full history of an animal. Returns `None` if it does not exist.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<AnimalDetail>, sqlx::Error> {
        let Some(animal) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let Some(resumen) = Self::overview(pool, id).await? else {
            return Ok(None);
        };
        Ok(Some(AnimalDetail {
            animal,
            resumen,
            pesajes: PesajeRepo::list_for_animal(pool, id).await?,
            gastos: GastoRepo::list_for_animal(pool, id).await?,
            eventos: ReproductiveEventRepo::list_for_animal(pool, id).await?,
            venta: VentaRepo::find_by_animal(pool, id).await?,
            crias: Self::list_calves(pool, id).await?,
        }))
    }

    /// Update an animal. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnimal,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "UPDATE animales SET \
                caravana = COALESCE($2, caravana), \
                categoria = COALESCE($3, categoria), \
                raza = COALESCE($4, raza), \
                estado_reproductivo = COALESCE($5, estado_reproductivo), \
                lote_actual_id = CASE WHEN $6 THEN $7 ELSE lote_actual_id END, \
                fecha_carencia = CASE WHEN $8 THEN $9 ELSE fecha_carencia END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(&input.caravana)
            .bind(&input.categoria)
            .bind(&input.raza)
            .bind(input.estado_reproductivo.map(|s| s.as_str()))
            .bind(input.lote_actual_id.is_some())
            .bind(input.lote_actual_id.flatten())
            .bind(input.fecha_carencia.is_some())
            .bind(input.fecha_carencia.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Deactivate an animal and take it out of its parcel.
    ///
    /// Returns `false` if the animal does not exist or is already inactive.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE animales SET activo = false, lote_actual_id = NULL \
             WHERE id = $1 AND activo = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move active animals into a parcel, or out of any parcel when
    /// `lote_id` is `None`. Returns the number of animals moved.
    pub async fn move_to_lote(
        pool: &PgPool,
        animal_ids: &[DbId],
        lote_id: Option<DbId>,
    ) -> RepoResult<u64> {
        if let Some(lote_id) = lote_id {
            let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM lotes WHERE id = $1")
                .bind(lote_id)
                .fetch_optional(pool)
                .await?;
            if exists.is_none() {
                return Err(CoreError::NotFound {
                    entity: "Lote",
                    id: lote_id,
                }
                .into());
            }
        }
        let result = sqlx::query(
            "UPDATE animales SET lote_actual_id = $2 WHERE id = ANY($1) AND activo = true",
        )
        .bind(animal_ids)
        .bind(lote_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateAnimal,
    ) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "INSERT INTO animales \
                (caravana, categoria, raza, peso_actual, estado_reproductivo, \
                 lote_actual_id, madre_id, fecha_ingreso, fecha_carencia) \
             VALUES ($1, $2, $3, COALESCE($4, 0), $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(&input.caravana)
            .bind(&input.categoria)
            .bind(&input.raza)
            .bind(input.peso_inicial)
            .bind(input.estado_reproductivo.as_str())
            .bind(input.lote_actual_id)
            .bind(input.madre_id)
            .bind(input.fecha_ingreso)
            .bind(input.fecha_carencia)
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock and return an animal for the rest of the transaction.
    pub(crate) async fn lock_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animales WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_status_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: ReproductiveStatus,
    ) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "UPDATE animales SET estado_reproductivo = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Resolve a bulk selector to the active animals it designates, locked
    /// for the rest of the transaction.
    pub(crate) async fn resolve_selector_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        selector: &AnimalSelector,
    ) -> Result<Vec<Animal>, sqlx::Error> {
        match selector {
            AnimalSelector::Todos => {
                let query = format!(
                    "SELECT {COLUMNS} FROM animales WHERE activo = true ORDER BY id FOR UPDATE"
                );
                sqlx::query_as::<_, Animal>(&query).fetch_all(&mut **tx).await
            }
            AnimalSelector::SinLote => {
                let query = format!(
                    "SELECT {COLUMNS} FROM animales \
                     WHERE activo = true AND lote_actual_id IS NULL ORDER BY id FOR UPDATE"
                );
                sqlx::query_as::<_, Animal>(&query).fetch_all(&mut **tx).await
            }
            AnimalSelector::Lote { lote_id } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM animales \
                     WHERE activo = true AND lote_actual_id = $1 ORDER BY id FOR UPDATE"
                );
                sqlx::query_as::<_, Animal>(&query)
                    .bind(lote_id)
                    .fetch_all(&mut **tx)
                    .await
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fetch the two latest weighings of every listed animal and compute
    /// daily gain and last weighing date.
    async fn attach_weighings(
        pool: &PgPool,
        rows: Vec<AnimalOverviewRow>,
    ) -> Result<Vec<AnimalOverview>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let recent = sqlx::query_as::<_, RecentWeighing>(
            "SELECT animal_id, kilos, fecha FROM ( \
                SELECT animal_id, kilos, fecha, \
                       ROW_NUMBER() OVER ( \
                           PARTITION BY animal_id ORDER BY fecha DESC, id DESC \
                       ) AS rn \
                FROM pesajes WHERE animal_id = ANY($1) \
             ) ranked \
             WHERE rn <= 2 \
             ORDER BY animal_id, rn",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut by_animal: HashMap<DbId, Vec<WeighingPoint>> = HashMap::new();
        for w in recent {
            by_animal.entry(w.animal_id).or_default().push(WeighingPoint {
                kilos: w.kilos,
                fecha: w.fecha,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let points = by_animal.get(&row.id).map(Vec::as_slice).unwrap_or_default();
                let gdp = points
                    .first()
                    .map(|latest| daily_gain(latest, points.get(1)))
                    .unwrap_or(0.0);
                AnimalOverview {
                    id: row.id,
                    caravana: row.caravana,
                    categoria: row.categoria,
                    raza: row.raza,
                    estado_reproductivo: row.estado_reproductivo,
                    lote_actual_id: row.lote_actual_id,
                    lote_nombre: row.lote_nombre,
                    activo: row.activo,
                    fecha_carencia: row.fecha_carencia,
                    peso_actual: row.peso_actual,
                    gdp,
                    ultimo_pesaje: points.first().map(|p| p.fecha),
                    costo_acumulado: row.costo_acumulado,
                }
            })
            .collect())
    }
}
